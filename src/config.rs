//! TOML configuration.
//!
//! Every section is optional; a missing file section takes its defaults.
//! See [`load_config`] for validation rules.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use support_triage_core::rank::RankParams;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
            top_k: default_top_k(),
        }
    }
}

impl RetrievalConfig {
    pub fn rank_params(&self) -> RankParams {
        RankParams {
            relevance_threshold: self.relevance_threshold,
            top_k: self.top_k,
        }
    }
}

fn default_relevance_threshold() -> f64 {
    RankParams::default().relevance_threshold
}
fn default_top_k() -> usize {
    RankParams::default().top_k
}

#[derive(Debug, Deserialize, Clone)]
pub struct SentimentConfig {
    #[serde(default = "default_num_emails")]
    pub default_num_emails: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            default_num_emails: default_num_emails(),
        }
    }
}

fn default_num_emails() -> usize {
    10
}

/// Optional dataset overrides. Unset paths use the built-in corpora.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorpusConfig {
    pub articles: Option<PathBuf>,
    pub emails: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `support_triage=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Read, parse, and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

/// Load `path` if given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

fn validate(config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&config.retrieval.relevance_threshold) {
        anyhow::bail!("retrieval.relevance_threshold must be in [0.0, 1.0]");
    }

    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        validate(&config).unwrap();
        assert_eq!(config.retrieval.rank_params(), RankParams::default());
        assert_eq!(config.sentiment.default_num_emails, 10);
        assert_eq!(config.server.bind, "127.0.0.1:7340");
        assert_eq!(config.logging.level, "info");
        assert!(config.corpus.articles.is_none());
    }

    #[test]
    fn test_partial_section() {
        let config: Config = toml::from_str("[retrieval]\ntop_k = 3\n").unwrap();
        assert_eq!(config.retrieval.top_k, 3);
        assert!((config.retrieval.relevance_threshold - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let config: Config = toml::from_str("[retrieval]\nrelevance_threshold = 1.5\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_top_k() {
        let config: Config = toml::from_str("[retrieval]\ntop_k = 0\n").unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_missing_file_errors() {
        let err = load_config(Path::new("/nonexistent/triage.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
