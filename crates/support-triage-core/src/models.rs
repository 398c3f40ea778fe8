//! Core data models used throughout Support Triage.
//!
//! Corpus records ([`Document`], [`EmailRecord`]) are immutable inputs loaded
//! once at startup. Result records ([`ScoredDocument`], [`ClassificationResult`],
//! [`SentimentResult`]) are derived per call and never cached.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A knowledge-base article in the retrieval corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A document paired with its similarity score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    /// Relevance score in `[0.0, 1.0]`.
    pub score: f64,
}

/// A support email with its labelled tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: u64,
    pub subject: String,
    pub body: String,
    pub customer_id: String,
    pub ground_truth_tag: String,
}

impl EmailRecord {
    /// Subject and body joined by a single space, the text every classifier sees.
    pub fn text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}

/// How a [`ClassificationResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// A keyword rule fired.
    #[serde(rename = "Pattern Match")]
    PatternMatch,
    /// No rule fired; the customer-scoped default was used.
    Fallback,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::PatternMatch => f.write_str("Pattern Match"),
            Method::Fallback => f.write_str("Fallback"),
        }
    }
}

/// Output of the email classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub tag: String,
    pub confidence: f64,
    pub method: Method,
}

/// Sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Lower-case form used in structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Capitalized form used in plain-label output.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured output of the sentiment labeler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub reasoning: String,
}

/// The two output shapes of the sentiment labeler.
///
/// Serializes untagged: a bare string for [`SentimentOutput::PlainLabel`],
/// an object for [`SentimentOutput::Structured`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SentimentOutput {
    PlainLabel(String),
    Structured(SentimentResult),
}
