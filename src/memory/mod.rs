//! Message storage and recall: records, the append-only room log, the node
//! builder, cosine recall and the per-session chat state.

pub mod log;
pub mod node;
pub mod recall;
pub mod session;
pub mod types;
