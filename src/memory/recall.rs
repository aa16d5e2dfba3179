//! Nearest-neighbour recall over a room log.
//!
//! Brute force: every record in the file is scored against the query by
//! cosine similarity, then the list is stably sorted and truncated.

use ndarray::ArrayView1;
use serde::Serialize;
use std::path::Path;

use crate::embedding::EmbeddingProvider;
use crate::error::LogResult;
use crate::memory::log::entries_at;
use crate::memory::types::{LogEntry, MessageNode, SkippedLine};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RecallHit {
    pub similarity: f64,
    pub node: MessageNode,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecallResult {
    /// Best first; equal scores keep file order.
    pub hits: Vec<RecallHit>,
    /// Unparsable lines and records whose embedding cannot be compared with the query.
    pub skipped: Vec<SkippedLine>,
}

impl RecallResult {
    pub fn into_pairs(self) -> Vec<(f64, MessageNode)> {
        self.hits.into_iter().map(|h| (h.similarity, h.node)).collect()
    }
}

/// Cosine similarity in `[-1, 1]`.
///
/// Returns 0.0 when either vector has zero magnitude, or when the lengths
/// differ, instead of producing NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let a = ArrayView1::from(a).mapv(f64::from);
    let b = ArrayView1::from(b).mapv(f64::from);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Rank the records of the log at `path` against `query`, keeping at most `top_n`.
pub fn recall(path: impl AsRef<Path>, query: &[f32], top_n: usize) -> LogResult<RecallResult> {
    let path = path.as_ref();
    let mut result = RecallResult::default();

    for entry in entries_at(path)? {
        match entry? {
            LogEntry::Node { line, node } => {
                if node.embedding.len() != query.len() {
                    result.skipped.push(SkippedLine {
                        line,
                        reason: format!(
                            "embedding has {} dimensions, query has {}",
                            node.embedding.len(),
                            query.len()
                        ),
                    });
                    continue;
                }
                let similarity = cosine_similarity(query, &node.embedding);
                result.hits.push(RecallHit { similarity, node });
            }
            LogEntry::Skipped(skip) => result.skipped.push(skip),
        }
    }

    result
        .hits
        .sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    result.hits.truncate(top_n);

    tracing::debug!(
        path = %path.display(),
        returned = result.hits.len(),
        skipped = result.skipped.len(),
        "recall complete"
    );
    Ok(result)
}

/// Embed `text` with `embedder`, then [`recall`].
pub fn recall_text(
    path: impl AsRef<Path>,
    text: &str,
    embedder: &dyn EmbeddingProvider,
    top_n: usize,
) -> LogResult<RecallResult> {
    let query = embedder.embed(text);
    recall(path, &query, top_n)
}
