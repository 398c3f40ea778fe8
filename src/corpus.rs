//! Corpus loading.
//!
//! Builds the read-only [`Corpus`] once at startup from the built-in
//! datasets or from the JSON files named in `[corpus]`.

use anyhow::{Context, Result};
use std::path::Path;

use support_triage_core::corpus::{self, builtin_articles, builtin_emails};
use support_triage_core::models::{Document, EmailRecord};

use crate::config::Config;

/// The static datasets every request is evaluated against.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub articles: Vec<Document>,
    pub emails: Vec<EmailRecord>,
}

impl Corpus {
    /// Built-in knowledge base and email set.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            articles: builtin_articles()?,
            emails: builtin_emails()?,
        })
    }
}

/// Load the corpus described by `config`.
pub fn load_corpus(config: &Config) -> Result<Corpus> {
    let articles = match &config.corpus.articles {
        Some(path) => corpus::parse_articles(&read(path)?)
            .with_context(|| format!("Failed to load articles from {}", path.display()))?,
        None => builtin_articles()?,
    };

    let emails = match &config.corpus.emails {
        Some(path) => corpus::parse_emails(&read(path)?)
            .with_context(|| format!("Failed to load emails from {}", path.display()))?,
        None => builtin_emails()?,
    };

    tracing::debug!(
        articles = articles.len(),
        emails = emails.len(),
        "corpus loaded"
    );

    Ok(Corpus { articles, emails })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}
