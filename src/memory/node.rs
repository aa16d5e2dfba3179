//! Message node builder.
//!
//! Turns raw chat text into a [`MessageNode`]. Every derived field is a
//! function of the content alone except `timestamp`: the id is a truncated
//! SHA-256, the embedding comes from the provider, and the signal score is
//! drawn from its own content-seeded stream.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::embedding::seeded::{content_rng, SeededEmbeddingProvider};
use crate::embedding::EmbeddingProvider;
use crate::memory::types::{MessageNode, CHAT_TAG};

/// Hex characters of the content digest kept in the id.
const ID_HEX_LEN: usize = 12;
const SIGNAL_STREAM: u64 = 1;
const SIGNAL_FLOOR: f64 = 0.7;
const SIGNAL_SPAN: f64 = 0.3;

/// `msg_` + first 12 hex chars of SHA-256(`content`).
pub fn message_id(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("msg_{}", &hex[..ID_HEX_LEN])
}

/// Placeholder quality score in `[0.7, 1.0]`, 3 decimals, reproducible per content.
pub fn signal_score(content: &str) -> f64 {
    let mut rng = content_rng(content, SIGNAL_STREAM);
    let raw = SIGNAL_FLOOR + SIGNAL_SPAN * rng.gen::<f64>();
    ((raw * 1000.0).round() / 1000.0).clamp(SIGNAL_FLOOR, SIGNAL_FLOOR + SIGNAL_SPAN)
}

/// Builds message nodes with a given embedding provider.
pub struct NodeBuilder<'a> {
    embedder: &'a dyn EmbeddingProvider,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(embedder: &'a dyn EmbeddingProvider) -> Self {
        Self { embedder }
    }

    /// Build a node stamped with the current wall-clock second.
    pub fn build(&self, user_id: &str, username: &str, room: &str, content: &str) -> MessageNode {
        self.build_at(user_id, username, room, content, chrono::Utc::now().timestamp())
    }

    pub fn build_at(
        &self,
        user_id: &str,
        username: &str,
        room: &str,
        content: &str,
        timestamp: i64,
    ) -> MessageNode {
        MessageNode {
            id: message_id(content),
            user_id: user_id.to_string(),
            username: username.to_string(),
            room: room.to_string(),
            timestamp,
            content: content.to_string(),
            embedding: self.embedder.embed(content),
            tags: [CHAT_TAG.to_string()].into_iter().collect(),
            signal_score: signal_score(content),
        }
    }
}

/// Build a node with the default seeded embedding.
pub fn build(user_id: &str, username: &str, room: &str, content: &str) -> MessageNode {
    let embedder = SeededEmbeddingProvider::default();
    NodeBuilder::new(&embedder).build(user_id, username, room, content)
}
