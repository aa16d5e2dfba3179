//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait and the content-seeded stand-in
//! provider. Stored vectors are placeholders, not semantic embeddings: equal
//! text yields equal vectors, and nothing more can be assumed. The provider is
//! created via [`create_provider`] from configuration.

pub mod seeded;

use anyhow::Result;

/// Number of dimensions in stored message embeddings.
pub const EMBEDDING_DIM: usize = 32;

/// Trait for embedding text into vectors.
///
/// Implementations must be deterministic for a given text within a process;
/// recall compares stored vectors against freshly embedded queries.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Create an embedding provider from config.
///
/// Currently only `"seeded"` is supported.
pub fn create_provider(
    config: &crate::config::EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "seeded" => {
            anyhow::ensure!(config.dimensions > 0, "embedding dimensions must be > 0");
            Ok(Box::new(seeded::SeededEmbeddingProvider::new(config.dimensions)))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: seeded"),
    }
}
