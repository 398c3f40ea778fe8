//! Knowledge-base retrieval with template answers.
//!
//! Ranks the articles for a query, builds the answer from the top article,
//! and reports the best score as confidence. Used by both
//! `triage retrieve` and `POST /retrieve`.

use serde::{Deserialize, Serialize};

use support_triage_core::answer::generate_answer;
use support_triage_core::rank::{rank, RankParams};
use support_triage_core::similarity;

use crate::corpus::Corpus;
use crate::error::{Result, TriageError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveRequest {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrievedArticle {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleScore {
    pub article_id: String,
    pub article_title: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    pub query: String,
    pub answer: String,
    /// Best score across all articles, before thresholding.
    pub confidence: f64,
    pub retrieved_articles: Vec<RetrievedArticle>,
    pub all_scores: Vec<ArticleScore>,
}

/// Core retrieval function returning structured data (used by CLI and server).
pub fn retrieve(corpus: &Corpus, params: &RankParams, req: &RetrieveRequest) -> Result<RetrieveResponse> {
    let query = match req.query.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(TriageError::validation("query is required")),
    };

    let ranking = rank(query, &corpus.articles, params);
    let answer = generate_answer(query, ranking.top().map(|sd| sd.document));

    let retrieved_articles = ranking
        .retrieved
        .iter()
        .map(|sd| RetrievedArticle {
            id: sd.document.id.clone(),
            title: sd.document.title.clone(),
            tags: sd.document.tags.clone(),
        })
        .collect();

    let all_scores = ranking
        .all
        .iter()
        .map(|sd| ArticleScore {
            article_id: sd.document.id.clone(),
            article_title: sd.document.title.clone(),
            score: sd.score,
        })
        .collect();

    Ok(RetrieveResponse {
        query: query.to_string(),
        answer,
        confidence: ranking.confidence,
        retrieved_articles,
        all_scores,
    })
}

/// CLI entry point for `triage retrieve`.
pub fn run_retrieve(corpus: &Corpus, params: &RankParams, query: &str, json: bool) -> anyhow::Result<()> {
    let response = retrieve(
        corpus,
        params,
        &RetrieveRequest {
            query: Some(query.to_string()),
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("answer (confidence {:.2}):", response.confidence);
    println!("    {}", response.answer);
    println!();

    if response.retrieved_articles.is_empty() {
        println!("No articles above threshold.");
    } else {
        println!("retrieved:");
        for (i, a) in response.retrieved_articles.iter().enumerate() {
            println!("{}. {} / {} [{}]", i + 1, a.id, a.title, a.tags.join(", "));
        }
    }

    println!();
    println!("scores:");
    for s in &response.all_scores {
        println!("    [{:.3}] {} / {}", s.score, s.article_id, s.article_title);
    }

    Ok(())
}

/// CLI entry point for `triage score`.
pub fn run_score(text_a: &str, text_b: &str) -> anyhow::Result<()> {
    println!("{:.6}", similarity::score(text_a, text_b));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use support_triage_core::answer::NOT_FOUND_ANSWER;

    fn corpus() -> Corpus {
        Corpus::builtin().unwrap()
    }

    fn request(q: &str) -> RetrieveRequest {
        RetrieveRequest {
            query: Some(q.to_string()),
        }
    }

    #[test]
    fn test_missing_query() {
        let err = retrieve(&corpus(), &RankParams::default(), &RetrieveRequest::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_whitespace_query() {
        let err = retrieve(&corpus(), &RankParams::default(), &request("  \t ")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_configure_automations() {
        let resp = retrieve(
            &corpus(),
            &RankParams::default(),
            &request("How do I configure automations?"),
        )
        .unwrap();
        assert_eq!(resp.retrieved_articles[0].id, "kb_001");
        assert!(resp.confidence >= 0.6);
        assert!(resp
            .answer
            .starts_with("Based on our knowledge base, you can configure automations in the Admin Panel. To configure automations in Hiver"));
        assert_eq!(resp.all_scores.len(), 6);
        assert_eq!(resp.all_scores[0].article_id, "kb_001");
    }

    #[test]
    fn test_csat_query() {
        let resp = retrieve(&corpus(), &RankParams::default(), &request("Why is CSAT not appearing?")).unwrap();
        assert_eq!(resp.retrieved_articles[0].id, "kb_002");
        assert!(resp.answer.starts_with("Regarding CSAT visibility: If CSAT scores"));
    }

    #[test]
    fn test_nonsense_query() {
        let resp = retrieve(&corpus(), &RankParams::default(), &request("xyzzy nonsense query")).unwrap();
        assert!(resp.retrieved_articles.is_empty());
        assert_eq!(resp.answer, NOT_FOUND_ANSWER);
        assert_eq!(resp.confidence, 0.0);
        assert_eq!(resp.all_scores.len(), 6);
    }

    #[test]
    fn test_query_is_echoed_untrimmed() {
        let resp = retrieve(&corpus(), &RankParams::default(), &request(" billing ")).unwrap();
        assert_eq!(resp.query, " billing ");
        assert_eq!(resp.retrieved_articles[0].id, "kb_005");
    }

    #[test]
    fn test_retrieve_deterministic() {
        let c = corpus();
        let req = request("SLA breach notifications for urgent tickets");
        let a = serde_json::to_string(&retrieve(&c, &RankParams::default(), &req).unwrap()).unwrap();
        let b = serde_json::to_string(&retrieve(&c, &RankParams::default(), &req).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
