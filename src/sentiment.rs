//! Sentiment labeling over the email corpus.
//!
//! Two prompt versions select the output shape: `v1` yields a plain
//! capitalized label per email, `v2` a structured record with confidence
//! and reasoning. Used by both `triage sentiment` and `POST /sentiment`.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use support_triage_core::models::SentimentOutput;
use support_triage_core::sentiment::label;

use crate::corpus::Corpus;
use crate::error::{Result, TriageError};

pub const PROMPT_V1: &str = "Analyze the sentiment of the following email.
Return only Positive, Negative, or Neutral.";

pub const PROMPT_V2: &str = r#"You are a helpful customer support analyst. Analyze the sentiment of the email below.

Output Format: JSON
{
  "sentiment": "positive" | "negative" | "neutral",
  "confidence": <float between 0 and 1>,
  "reasoning": "<brief explanation of why>"
}

Rules:
- "Urgent" or "Frustrated" usually implies Negative.
- Feature requests are usually Neutral or Positive (if polite).
- Bug reports are Negative.
- Simple questions are Neutral.

Email:
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVersion {
    V1,
    #[default]
    V2,
}

impl PromptVersion {
    pub fn prompt(&self) -> &'static str {
        match self {
            PromptVersion::V1 => PROMPT_V1,
            PromptVersion::V2 => PROMPT_V2,
        }
    }

    /// `v2` asks for the structured output shape.
    pub fn is_structured(&self) -> bool {
        matches!(self, PromptVersion::V2)
    }
}

impl fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptVersion::V1 => f.write_str("v1"),
            PromptVersion::V2 => f.write_str("v2"),
        }
    }
}

impl FromStr for PromptVersion {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v1" => Ok(PromptVersion::V1),
            "v2" => Ok(PromptVersion::V2),
            other => Err(TriageError::validation(format!(
                "prompt_version must be v1 or v2, got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentimentRequest {
    pub prompt_version: Option<String>,
    pub num_emails: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabeledEmail {
    pub id: u64,
    pub subject: String,
    pub body: String,
    pub output: SentimentOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentResponse {
    pub prompt_version: PromptVersion,
    pub prompt_text: String,
    pub results: Vec<LabeledEmail>,
    pub total_emails: usize,
}

/// Core sentiment function returning structured data (used by CLI and server).
///
/// `default_num_emails` applies when the request omits `num_emails`.
pub fn analyze_sentiment(
    corpus: &Corpus,
    req: &SentimentRequest,
    default_num_emails: usize,
) -> Result<SentimentResponse> {
    let version = match req.prompt_version.as_deref() {
        Some(v) => v.parse::<PromptVersion>()?,
        None => PromptVersion::default(),
    };

    let requested = match req.num_emails {
        Some(n) if n < 0 => {
            return Err(TriageError::validation("num_emails must not be negative"));
        }
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        None => default_num_emails,
    };
    let count = requested.min(corpus.emails.len());

    let structured = version.is_structured();
    let results: Vec<LabeledEmail> = corpus.emails[..count]
        .par_iter()
        .map(|email| LabeledEmail {
            id: email.id,
            subject: email.subject.clone(),
            body: email.body.clone(),
            output: label(&email.text(), structured),
        })
        .collect();

    Ok(SentimentResponse {
        prompt_version: version,
        prompt_text: version.prompt().to_string(),
        total_emails: results.len(),
        results,
    })
}

/// CLI entry point for `triage sentiment`.
pub fn run_sentiment(
    corpus: &Corpus,
    prompt_version: &str,
    num_emails: Option<i64>,
    default_num_emails: usize,
    json: bool,
) -> anyhow::Result<()> {
    let response = analyze_sentiment(
        corpus,
        &SentimentRequest {
            prompt_version: Some(prompt_version.to_string()),
            num_emails,
        },
        default_num_emails,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("prompt {}:", response.prompt_version);
    println!("{}", response.prompt_text.trim_end());
    println!();

    for r in &response.results {
        println!("{}. {}", r.id, r.subject);
        match &r.output {
            SentimentOutput::PlainLabel(label) => println!("    sentiment: {}", label),
            SentimentOutput::Structured(s) => {
                println!("    sentiment: {}", s.sentiment);
                println!("    confidence: {:.0}%", s.confidence * 100.0);
                println!("    reasoning: {}", s.reasoning);
            }
        }
    }

    println!();
    println!("emails: {}", response.total_emails);
    Ok(())
}
