//! # Support Triage Core
//!
//! Pure scoring logic for Support Triage: data models, text normalizer,
//! keyword-boosted similarity, retrieval ranker, answer templates, and the
//! rule-based email classifier and sentiment labeler.
//!
//! This crate performs no I/O and holds no mutable state. Every operation is
//! a deterministic function of its inputs and the fixed rule tables, so
//! results can be computed in parallel without coordination.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Corpus records and result types |
//! | [`normalize`] | Lower-casing tokenizer with stop words |
//! | [`similarity`] | Jaccard overlap plus keyword boosts |
//! | [`rank`] | Threshold + top-k retrieval ranking |
//! | [`answer`] | Template answers over the top document |
//! | [`classify`] | Ordered keyword rules → tag |
//! | [`sentiment`] | Ordered keyword rules → sentiment |
//! | [`corpus`] | Built-in datasets and customer scoping |

pub mod answer;
pub mod classify;
pub mod corpus;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod sentiment;
pub mod similarity;
