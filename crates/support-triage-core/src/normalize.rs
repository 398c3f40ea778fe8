//! Text normalizer for token-overlap scoring.
//!
//! Lower-cases the input, splits it on runs of non-word characters, and
//! drops short tokens and stop words.
//!
//! A word character is an ASCII letter, ASCII digit, or underscore. Every
//! other character (punctuation, whitespace, and all non-ASCII characters)
//! is a separator, so surviving tokens are always ASCII.
//!
//! # Example
//!
//! ```rust
//! use support_triage_core::normalize::normalize;
//!
//! let tokens = normalize("How do I configure the SLA?");
//! assert_eq!(tokens, vec!["how", "do", "configure", "sla"]);
//! ```

/// Tokens shorter than this are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

/// Function words that carry no retrieval signal.
pub const STOP_WORDS: &[&str] = &[
    "is", "are", "the", "a", "an", "and", "or", "but", "to", "of", "in", "on", "at", "for", "with",
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns `true` if `token` is in [`STOP_WORDS`].
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokenize `text` into lower-case tokens, preserving input order and duplicates.
///
/// Empty input yields an empty vector.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .filter(|w| !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t").is_empty());
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            normalize("Shared-Mailbox, PERMISSIONS!"),
            vec!["shared", "mailbox", "permissions"]
        );
    }

    #[test]
    fn test_drops_short_tokens() {
        assert_eq!(normalize("I x y go"), vec!["go"]);
    }

    #[test]
    fn test_drops_stop_words() {
        assert!(normalize("the and or but to of in on at for with is are a an").is_empty());
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        assert_eq!(normalize("csat csat score"), vec!["csat", "csat", "score"]);
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        assert_eq!(normalize("kb_001 utf8"), vec!["kb_001", "utf8"]);
    }

    #[test]
    fn test_non_ascii_is_a_separator() {
        assert_eq!(normalize("8–10 seconds"), vec!["10", "seconds"]);
        assert_eq!(normalize("café"), vec!["caf"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Why is CSAT not appearing?";
        assert_eq!(normalize(text), normalize(text));
    }
}
