//! Customer-scoped email classification.
//!
//! Classifies every email of one customer, using that customer's own tag
//! set as the fallback vocabulary, and scores the predictions against the
//! labelled tags. Used by both `triage classify` and `POST /classify`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use support_triage_core::classify::{accuracy, classify, is_correct};
use support_triage_core::corpus::{customer_emails, customer_tags};
use support_triage_core::models::Method;

use crate::corpus::Corpus;
use crate::error::{Result, TriageError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyRequest {
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedEmail {
    pub email_id: u64,
    pub subject: String,
    pub body: String,
    pub ground_truth: String,
    pub predicted: String,
    pub confidence: f64,
    pub method: Method,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub customer_id: String,
    pub results: Vec<ClassifiedEmail>,
    /// Percentage of correct predictions, `0` when there are no emails.
    pub accuracy: u32,
    pub total_emails: usize,
    pub correct_predictions: usize,
    pub customer_tags: Vec<String>,
}

/// Core classification function returning structured data (used by CLI and server).
pub fn classify_customer(corpus: &Corpus, req: &ClassifyRequest) -> Result<ClassifyResponse> {
    let customer_id = match req.customer_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(TriageError::validation("customer_id is required")),
    };

    let emails = customer_emails(&corpus.emails, customer_id);
    let tags = customer_tags(emails.iter().copied());

    let results: Vec<ClassifiedEmail> = emails
        .par_iter()
        .map(|email| {
            let prediction = classify(&email.subject, &email.body, &email.customer_id, &tags);
            ClassifiedEmail {
                email_id: email.id,
                subject: email.subject.clone(),
                body: email.body.clone(),
                ground_truth: email.ground_truth_tag.clone(),
                is_correct: is_correct(&prediction.tag, &email.ground_truth_tag),
                predicted: prediction.tag,
                confidence: prediction.confidence,
                method: prediction.method,
            }
        })
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();

    Ok(ClassifyResponse {
        customer_id: customer_id.to_string(),
        accuracy: accuracy(correct, results.len()),
        total_emails: results.len(),
        correct_predictions: correct,
        customer_tags: tags,
        results,
    })
}

/// CLI entry point for `triage classify`.
pub fn run_classify(corpus: &Corpus, customer_id: &str, json: bool) -> anyhow::Result<()> {
    let response = classify_customer(
        corpus,
        &ClassifyRequest {
            customer_id: Some(customer_id.to_string()),
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("customer: {}", response.customer_id);
    println!("tags: {}", response.customer_tags.join(", "));
    println!();

    if response.results.is_empty() {
        println!("No emails.");
        return Ok(());
    }

    for r in &response.results {
        let mark = if r.is_correct { "✓" } else { "✗" };
        println!("{} {}. {}", mark, r.email_id, r.subject);
        println!("    ground truth: {}", r.ground_truth);
        println!(
            "    predicted: {} ({:.2}, {})",
            r.predicted, r.confidence, r.method
        );
    }

    println!();
    println!(
        "accuracy: {}% ({}/{})",
        response.accuracy, response.correct_predictions, response.total_emails
    );

    Ok(())
}
