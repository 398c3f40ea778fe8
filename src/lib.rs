//! # Support Triage
//!
//! Keyword-scored tooling for a support inbox: knowledge-base retrieval with
//! template answers, customer-scoped email tagging, and sentiment labeling.
//!
//! The scoring engine itself lives in [`support_triage_core`]; this crate
//! wraps it with configuration, corpus loading, request validation, a CLI,
//! and an HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐
//! │ Corpus JSON  │──▶│ support-triage-core       │
//! │ KB + emails  │   │ normalize · score · rank  │
//! └──────────────┘   │ classify · sentiment      │
//!                    └────────────┬─────────────┘
//!                                 │
//!                    ┌────────────┴────────────┐
//!                    ▼                         ▼
//!               ┌──────────┐             ┌──────────┐
//!               │   CLI    │             │   HTTP   │
//!               │ (triage) │             │  (axum)  │
//!               └──────────┘             └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! triage retrieve "How do I configure automations?"
//! triage classify CUST_A
//! triage sentiment --prompt-version v1 --num-emails 5
//! triage serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Dataset loading |
//! | [`error`] | Validation / internal error taxonomy |
//! | [`classify`] | `classify` request handling |
//! | [`sentiment`] | `sentiment` request handling |
//! | [`retrieve`] | `retrieve` request handling |
//! | [`server`] | HTTP server |

pub mod classify;
pub mod config;
pub mod corpus;
pub mod error;
pub mod retrieve;
pub mod sentiment;
pub mod server;
