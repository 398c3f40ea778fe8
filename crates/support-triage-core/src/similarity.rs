//! Keyword-boosted Jaccard similarity.
//!
//! Scores a query against a candidate text in `[0.0, 1.0]`. The score is a
//! token-set Jaccard overlap plus an additive boost for domain keyword groups
//! that both texts mention.
//!
//! # Algorithm
//!
//! 1. For each group in [`KEYWORD_BOOSTS`], in order: if both lower-cased
//!    texts contain at least one of the group's keywords as a substring, add
//!    the group's weight to the boost. The running total is not capped.
//! 2. If `boost >= 0.4`, return `min(1, 0.6 + boost × 0.4)` without
//!    computing any token overlap.
//! 3. Normalize both texts. If the *first* text has no tokens left, return
//!    `0.3` when `boost > 0`, else `0.0`.
//! 4. Return `min(1, |A ∩ B| / |A ∪ B| + boost)` over the token sets.
//!
//! Step 3 inspects only the first argument. For any input that reaches it,
//! though, both arguments yield the same score in either order: a keyword
//! hit always leaves at least one token behind, so the boost is zero there.

use std::collections::HashSet;

use crate::normalize::normalize;

/// Boost total at or above which token overlap is skipped.
pub const STRONG_BOOST_THRESHOLD: f64 = 0.4;

/// Base score returned on a strong keyword match.
pub const STRONG_MATCH_BASE: f64 = 0.6;

/// Multiplier applied to the boost on a strong keyword match.
pub const STRONG_MATCH_SCALE: f64 = 0.4;

/// Score returned when the first text is empty after normalization but some
/// keyword group matched.
pub const SHORT_QUERY_SCORE: f64 = 0.3;

/// A group of interchangeable domain keywords and the boost it contributes.
#[derive(Debug, Clone, Copy)]
pub struct BoostGroup {
    pub keywords: &'static [&'static str],
    pub weight: f64,
}

impl BoostGroup {
    /// Returns `true` if the lower-cased `text` contains any keyword of the group.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Domain keyword groups, in evaluation order.
///
/// `configure` deliberately appears in two groups; a text mentioning it
/// collects both weights.
pub const KEYWORD_BOOSTS: &[BoostGroup] = &[
    BoostGroup {
        keywords: &["csat", "customer satisfaction"],
        weight: 0.5,
    },
    BoostGroup {
        keywords: &["automation", "automate", "configure"],
        weight: 0.5,
    },
    BoostGroup {
        keywords: &["sla", "service level"],
        weight: 0.4,
    },
    BoostGroup {
        keywords: &["billing", "invoice", "charge"],
        weight: 0.4,
    },
    BoostGroup {
        keywords: &["mailbox", "mail box", "shared"],
        weight: 0.4,
    },
    BoostGroup {
        keywords: &["merge", "mail merge"],
        weight: 0.4,
    },
    BoostGroup {
        keywords: &[
            "visibility",
            "appearing",
            "showing",
            "not visible",
            "not appearing",
        ],
        weight: 0.3,
    },
    BoostGroup {
        keywords: &["setup", "configure", "setting"],
        weight: 0.3,
    },
];

/// Sum of the weights of every keyword group both texts mention.
///
/// Matching is a case-insensitive substring test on the raw texts, not on
/// tokens. The result is not capped and can exceed `1.0`.
pub fn keyword_boost(text_a: &str, text_b: &str) -> f64 {
    let a = text_a.to_lowercase();
    let b = text_b.to_lowercase();

    KEYWORD_BOOSTS
        .iter()
        .filter(|group| group.matches(&a) && group.matches(&b))
        .map(|group| group.weight)
        .sum()
}

/// Jaccard similarity of two token lists, treated as sets.
///
/// Returns `None` when the union is empty.
pub fn jaccard(tokens_a: &[String], tokens_b: &[String]) -> Option<f64> {
    let set_a: HashSet<&str> = tokens_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = tokens_b.iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return None;
    }
    let intersection = set_a.intersection(&set_b).count();
    Some(intersection as f64 / union as f64)
}

/// Score `text_a` (the query) against `text_b` (the candidate).
///
/// Always returns a value in `[0.0, 1.0]`. Pure and deterministic.
pub fn score(text_a: &str, text_b: &str) -> f64 {
    let boost = keyword_boost(text_a, text_b);

    if boost >= STRONG_BOOST_THRESHOLD {
        return (STRONG_MATCH_BASE + boost * STRONG_MATCH_SCALE).min(1.0);
    }

    let tokens_a = normalize(text_a);
    if tokens_a.is_empty() {
        return if boost > 0.0 { SHORT_QUERY_SCORE } else { 0.0 };
    }
    let tokens_b = normalize(text_b);

    match jaccard(&tokens_a, &tokens_b) {
        Some(j) => (j + boost).clamp(0.0, 1.0),
        None => boost.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_boost_requires_both_texts() {
        assert!(approx(keyword_boost("billing question", "nothing here"), 0.0));
        assert!(approx(keyword_boost("billing question", "see the invoice"), 0.4));
    }

    #[test]
    fn test_boost_is_case_insensitive_substring() {
        // "automations" contains "automation"; "SLAs" contains "sla".
        assert!(approx(keyword_boost("Automations", "AUTOMATION rules"), 0.5));
        assert!(approx(keyword_boost("SLAs", "sla policy"), 0.4));
    }

    #[test]
    fn test_boost_accumulates_uncapped() {
        // csat 0.5 + automation 0.5 + sla 0.4 + billing 0.4 = 1.8
        let text = "csat automation sla billing";
        assert!(approx(keyword_boost(text, text), 1.8));
        assert!(approx(score(text, text), 1.0));
    }

    #[test]
    fn test_configure_hits_two_groups() {
        assert!(approx(keyword_boost("configure", "configure"), 0.8));
    }

    #[test]
    fn test_strong_boost_skips_jaccard() {
        // Only the billing group matches (0.4); token overlap is nil.
        let s = score("invoice", "billing");
        assert!(approx(s, 0.6 + 0.4 * 0.4));
    }

    #[test]
    fn test_weak_boost_adds_to_jaccard() {
        // Only the visibility group matches (0.3).
        // tokens: {showing, scores} vs {scores, showing, today} -> 2/3
        let s = score("showing scores", "scores showing today");
        assert!(approx(s, 2.0 / 3.0 + 0.3));
    }

    #[test]
    fn test_plain_jaccard() {
        // {export, report} vs {report, download} -> 1/3
        assert!(approx(score("export report", "report download"), 1.0 / 3.0));
    }

    #[test]
    fn test_first_text_without_tokens_scores_zero() {
        assert!(approx(score("to the", "export report"), 0.0));
        assert!(approx(score("", "export report"), 0.0));
        assert!(approx(score("", ""), 0.0));
    }

    #[test]
    fn test_short_query_branch_only_inspects_first_argument() {
        // The candidate has no tokens but the query does: Jaccard runs
        // over a non-empty union and finds no overlap.
        assert!(approx(score("export report", "to the"), 0.0));
        assert!(approx(score("export report", ""), 0.0));
    }

    #[test]
    fn test_argument_order() {
        // Token lists differ in length, sets are the same size either way.
        let a = "report report report";
        let b = "report export";
        assert!(approx(score(a, b), score(b, a)));
        assert!(approx(score(a, b), 0.5));
    }

    #[test]
    fn test_score_in_unit_interval() {
        let texts = [
            "",
            "hi",
            "How do I configure automations?",
            "Why is CSAT not appearing?",
            "csat customer satisfaction automation sla billing mailbox merge setup showing",
            "the of and",
            "xyzzy nonsense query",
            "Shared mailbox permission error",
        ];
        for a in &texts {
            for b in &texts {
                let s = score(a, b);
                assert!((0.0..=1.0).contains(&s), "score({:?}, {:?}) = {}", a, b, s);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let a = "Why is CSAT not appearing?";
        let b = "Troubleshooting CSAT Visibility";
        assert_eq!(score(a, b).to_bits(), score(a, b).to_bits());
    }

    #[test]
    fn test_jaccard_empty_union() {
        assert_eq!(jaccard(&[], &[]), None);
    }
}
