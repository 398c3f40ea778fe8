//! Keyword sentiment labeler.
//!
//! The lower-cased text is tested against [`SENTIMENT_RULES`] in order; the
//! first rule with a cue present decides the sentiment, confidence, and
//! reasoning. Text with no cue gets [`DEFAULT_RULE`].
//!
//! Two output shapes are available via [`label`]: a capitalized plain label
//! (`"Negative"`) or the structured [`SentimentResult`] with a lower-case
//! sentiment.

use crate::models::{Sentiment, SentimentOutput, SentimentResult};

/// A cue rule for the labeler.
#[derive(Debug, Clone, Copy)]
pub struct SentimentRule {
    pub cues: &'static [&'static str],
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub reasoning: &'static str,
}

impl SentimentRule {
    fn matches(&self, text: &str) -> bool {
        self.cues.iter().any(|c| text.contains(c))
    }

    fn result(&self) -> SentimentResult {
        SentimentResult {
            sentiment: self.sentiment,
            confidence: self.confidence,
            reasoning: self.reasoning.to_string(),
        }
    }
}

/// Sentiment rules in priority order.
pub const SENTIMENT_RULES: &[SentimentRule] = &[
    SentimentRule {
        cues: &[
            "unable",
            "error",
            "fail",
            "stuck",
            "not working",
            "missing",
            "disappeared",
        ],
        sentiment: Sentiment::Negative,
        confidence: 0.9,
        reasoning: "User is reporting a failure or inability to perform an action.",
    },
    SentimentRule {
        cues: &["help", "guide", "query", "need"],
        sentiment: Sentiment::Neutral,
        confidence: 0.8,
        reasoning: "User is asking for information or assistance.",
    },
    SentimentRule {
        cues: &["feature", "consider", "request"],
        sentiment: Sentiment::Positive,
        confidence: 0.6,
        reasoning: "User is suggesting improvements constructively.",
    },
];

/// Result used when no rule matches.
pub const DEFAULT_RULE: SentimentRule = SentimentRule {
    cues: &[],
    sentiment: Sentiment::Neutral,
    confidence: 0.7,
    reasoning: "Standard query.",
};

/// Analyse `text` and return the structured result.
pub fn analyze(text: &str) -> SentimentResult {
    let lower = text.to_lowercase();
    SENTIMENT_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .unwrap_or(&DEFAULT_RULE)
        .result()
}

/// Label `text` in the requested output shape.
pub fn label(text: &str, structured: bool) -> SentimentOutput {
    let result = analyze(text);
    if structured {
        SentimentOutput::Structured(result)
    } else {
        SentimentOutput::PlainLabel(result.sentiment.label().to_string())
    }
}
