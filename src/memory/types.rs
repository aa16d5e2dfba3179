//! Core record type definitions.
//!
//! Defines [`MessageNode`] (one stored chat message with its derived
//! metadata), [`LogRead`] (the result of reading a room log, parsed records
//! plus the lines that were dropped) and [`SkippedLine`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tag attached to every message built from chat input.
pub const CHAT_TAG: &str = "chat";

/// One chat message as stored in a room log.
///
/// Only `content` is required when decoding; every other field falls back to
/// its default so that hand-written or older records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageNode {
    /// `msg_` + first 12 hex chars of SHA-256(content).
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub room: String,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: i64,
    pub content: String,
    /// Stand-in embedding, components in `[-1, 1]`.
    #[serde(default)]
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Placeholder quality scalar in `[0.7, 1.0]`.
    #[serde(default)]
    pub signal_score: f64,
}

/// A log line that could not be turned into a [`MessageNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number within the log file.
    pub line: usize,
    pub reason: String,
}

/// Everything read from one log file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogRead {
    /// Parsed records, in file order.
    pub nodes: Vec<MessageNode>,
    /// Lines dropped during parsing, in file order.
    pub skipped: Vec<SkippedLine>,
}

impl LogRead {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// One line of a log, as yielded by the lazy reader.
#[derive(Debug, Clone)]
pub enum LogEntry {
    /// A decoded record and its 1-based line number.
    Node { line: usize, node: MessageNode },
    Skipped(SkippedLine),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record_decodes_with_defaults() {
        let node: MessageNode =
            serde_json::from_str(r#"{"user_id":"u1","content":"hello world hello"}"#).unwrap();
        assert_eq!(node.user_id, "u1");
        assert_eq!(node.content, "hello world hello");
        assert!(node.embedding.is_empty());
        assert!(node.tags.is_empty());
        assert_eq!(node.timestamp, 0);
    }

    #[test]
    fn record_without_content_is_rejected() {
        let res: Result<MessageNode, _> = serde_json::from_str(r#"{"user_id":"u1"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn tags_serialize_as_sorted_array() {
        let node = MessageNode {
            id: "msg_000000000000".into(),
            user_id: "u".into(),
            username: "n".into(),
            room: "r".into(),
            timestamp: 1,
            content: "c".into(),
            embedding: vec![0.5],
            tags: ["zeta".to_string(), "chat".to_string()].into_iter().collect(),
            signal_score: 0.8,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["chat", "zeta"]));
    }
}
