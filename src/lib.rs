//! Chat memory log with lexical analytics.
//!
//! Every chat message is stored as a [`memory::types::MessageNode`] in an
//! append-only JSON-lines file per user and room. On top of those logs the
//! crate builds three read-only views:
//!
//! | View | Entry point | Output |
//! |------|-------------|--------|
//! | **Word profile** | [`analysis::words::build_word_profile`] | Relative frequency of non-stopword tokens |
//! | **Bias profile** | [`analysis::bias::BiasAnalyzer`] | Mean lexicon category weights and their sentiment direction |
//! | **Recall** | [`memory::recall::recall`] | Stored messages ranked by cosine similarity to a query vector |
//!
//! # Storage
//!
//! Logs live at `<log_dir>/user_<user_id>/<room>_log.jsonl`. Files only grow.
//! Reads never fail on damaged lines: they are dropped and reported in
//! [`memory::types::LogRead::skipped`]. Appends take an advisory exclusive
//! lock per file.
//!
//! Embeddings are content-seeded placeholders (see [`embedding`]), not the
//! output of a language model.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment variables
//! - [`embedding`] - Embedding provider trait and the seeded stand-in
//! - [`memory`] - Records, room logs, node builder, recall and chat sessions
//! - [`analysis`] - Word and bias profiling, default scorers, CSV export
//! - [`error`] - Typed library errors

pub mod analysis;
pub mod config;
pub mod embedding;
pub mod error;
pub mod memory;
