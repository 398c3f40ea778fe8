//! Template answers over a [`Ranking`](crate::rank::Ranking).
//!
//! The first template whose trigger appears in the lower-cased query wraps
//! the top document's content. With no trigger the content is returned as
//! is; with no retrieved document a fixed apology is returned.

use crate::models::Document;

/// Answer returned when no document passed the relevance threshold.
pub const NOT_FOUND_ANSWER: &str = "I couldn't find any specific articles related to your query in the knowledge base. Could you try rephrasing?";

/// A canned answer prefix selected by query substrings.
#[derive(Debug, Clone, Copy)]
pub struct AnswerTemplate {
    pub triggers: &'static [&'static str],
    pub prefix: &'static str,
}

impl AnswerTemplate {
    fn matches(&self, query_lower: &str) -> bool {
        self.triggers.iter().any(|t| query_lower.contains(t))
    }

    fn render(&self, content: &str) -> String {
        format!("{}{}", self.prefix, content)
    }
}

/// Answer templates, first match wins.
pub const ANSWER_TEMPLATES: &[AnswerTemplate] = &[
    AnswerTemplate {
        triggers: &["automation", "configure"],
        prefix: "Based on our knowledge base, you can configure automations in the Admin Panel. ",
    },
    AnswerTemplate {
        triggers: &["csat", "visibility", "appearing", "not showing"],
        prefix: "Regarding CSAT visibility: ",
    },
    AnswerTemplate {
        triggers: &["sla", "service level"],
        prefix: "Here's information about SLAs: ",
    },
    AnswerTemplate {
        triggers: &["billing", "invoice"],
        prefix: "Regarding billing: ",
    },
    AnswerTemplate {
        triggers: &["mailbox", "shared"],
        prefix: "About shared mailboxes: ",
    },
    AnswerTemplate {
        triggers: &["merge", "mail merge"],
        prefix: "Regarding mail merge: ",
    },
];

/// Build the answer for `query` from the top retrieved document.
pub fn generate_answer(query: &str, top: Option<&Document>) -> String {
    let Some(doc) = top else {
        return NOT_FOUND_ANSWER.to_string();
    };

    let query_lower = query.to_lowercase();
    ANSWER_TEMPLATES
        .iter()
        .find(|t| t.matches(&query_lower))
        .map(|t| t.render(&doc.content))
        .unwrap_or_else(|| doc.content.clone())
}
