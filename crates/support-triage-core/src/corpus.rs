//! Static corpora and customer scoping.
//!
//! The knowledge base and the labelled email set ship as JSON embedded in
//! the crate. Callers may parse replacement datasets with
//! [`parse_articles`] / [`parse_emails`]; nothing here touches the
//! filesystem.

use anyhow::{Context, Result};

use crate::models::{Document, EmailRecord};

const ARTICLES_JSON: &str = include_str!("../data/articles.json");
const EMAILS_JSON: &str = include_str!("../data/emails.json");

/// Parse a JSON array of knowledge-base articles.
pub fn parse_articles(json: &str) -> Result<Vec<Document>> {
    serde_json::from_str(json).context("invalid article dataset")
}

/// Parse a JSON array of labelled emails.
pub fn parse_emails(json: &str) -> Result<Vec<EmailRecord>> {
    serde_json::from_str(json).context("invalid email dataset")
}

/// The built-in knowledge base (`kb_001`..`kb_006`).
pub fn builtin_articles() -> Result<Vec<Document>> {
    parse_articles(ARTICLES_JSON)
}

/// The built-in labelled email set.
pub fn builtin_emails() -> Result<Vec<EmailRecord>> {
    parse_emails(EMAILS_JSON)
}

/// Emails belonging to `customer_id`, in corpus order.
pub fn customer_emails<'a>(emails: &'a [EmailRecord], customer_id: &str) -> Vec<&'a EmailRecord> {
    emails
        .iter()
        .filter(|e| e.customer_id == customer_id)
        .collect()
}

/// Distinct ground-truth tags in first-appearance order.
pub fn customer_tags<'a, I>(emails: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let mut tags: Vec<String> = Vec::new();
    for email in emails {
        if !tags.contains(&email.ground_truth_tag) {
            tags.push(email.ground_truth_tag.clone());
        }
    }
    tags
}

/// Distinct customer ids in first-appearance order.
pub fn customer_ids(emails: &[EmailRecord]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for email in emails {
        if !ids.contains(&email.customer_id.as_str()) {
            ids.push(email.customer_id.as_str());
        }
    }
    ids
}
