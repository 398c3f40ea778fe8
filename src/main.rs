//! # Support Triage CLI (`triage`)
//!
//! Runs the scoring engine against the configured corpus from the command
//! line, or serves it over HTTP.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `triage classify <customer_id>` | Tag a customer's emails and report accuracy |
//! | `triage sentiment` | Label corpus emails (`--prompt-version v1\|v2`) |
//! | `triage retrieve "<query>"` | Rank knowledge-base articles and answer |
//! | `triage score <a> <b>` | Print the raw similarity of two texts |
//! | `triage customers` | List customers, email counts, and tags |
//! | `triage serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! triage retrieve "Why is CSAT not appearing?"
//! triage classify CUST_B --json
//! triage --config ./config/triage.toml serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use support_triage::config::{self, Config};
use support_triage::corpus::{load_corpus, Corpus};
use support_triage::{classify, retrieve, sentiment, server};
use support_triage_core::corpus::{customer_emails, customer_ids, customer_tags};

/// Support Triage — keyword-scored retrieval, email tagging, and sentiment
/// labeling for a support inbox.
#[derive(Parser)]
#[command(
    name = "triage",
    about = "Support Triage — keyword-scored retrieval, email tagging, and sentiment labeling",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional. Without it, built-in defaults and datasets are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Classify every email of one customer.
    ///
    /// Falls back to the customer's first known tag when no rule matches,
    /// and reports accuracy against the labelled tags.
    Classify {
        /// Customer identifier (e.g. `CUST_A`).
        customer_id: String,

        /// Print the JSON response instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Label the sentiment of corpus emails.
    Sentiment {
        /// `v1` for plain labels, `v2` for structured output.
        #[arg(long, default_value = "v2")]
        prompt_version: String,

        /// Number of emails to label, from the start of the corpus.
        #[arg(long, allow_negative_numbers = true)]
        num_emails: Option<i64>,

        /// Print the JSON response instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Retrieve knowledge-base articles for a query.
    Retrieve {
        /// The query text.
        query: String,

        /// Print the JSON response instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Print the similarity score of two texts (query first).
    Score {
        text_a: String,
        text_b: String,
    },

    /// List customers in the email corpus.
    Customers,

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_customers(corpus: &Corpus) {
    println!("{:<12} {:<8} TAGS", "CUSTOMER", "EMAILS");
    for id in customer_ids(&corpus.emails) {
        let emails = customer_emails(&corpus.emails, id);
        let tags = customer_tags(emails.iter().copied());
        println!("{:<12} {:<8} {}", id, emails.len(), tags.join(", "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Pure scoring needs neither config nor corpus
    if let Commands::Score { text_a, text_b } = &cli.command {
        return retrieve::run_score(text_a, text_b);
    }

    let cfg = config::load_or_default(cli.config.as_deref())?;
    init_tracing(&cfg);
    let corpus = load_corpus(&cfg)?;

    match cli.command {
        Commands::Classify { customer_id, json } => {
            classify::run_classify(&corpus, &customer_id, json)?;
        }
        Commands::Sentiment {
            prompt_version,
            num_emails,
            json,
        } => {
            sentiment::run_sentiment(
                &corpus,
                &prompt_version,
                num_emails,
                cfg.sentiment.default_num_emails,
                json,
            )?;
        }
        Commands::Retrieve { query, json } => {
            retrieve::run_retrieve(&corpus, &cfg.retrieval.rank_params(), &query, json)?;
        }
        Commands::Customers => {
            list_customers(&corpus);
        }
        Commands::Serve => {
            server::run_server(cfg, corpus).await?;
        }
        Commands::Score { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
