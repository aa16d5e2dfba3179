//! Content-seeded pseudo-random embeddings.
//!
//! The SHA-256 digest of the text seeds a ChaCha20 stream, so the same text
//! maps to the same vector in every process. Components are uniform in
//! `[-1, 1]` and rounded to 4 decimals.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use super::EmbeddingProvider;

/// Stream id reserved for embedding components. Other derived fields seeded
/// from the same digest must pick a different stream.
pub const EMBEDDING_STREAM: u64 = 0;

#[derive(Debug, Clone)]
pub struct SeededEmbeddingProvider {
    dim: usize,
}

impl SeededEmbeddingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for SeededEmbeddingProvider {
    fn default() -> Self {
        Self::new(super::EMBEDDING_DIM)
    }
}

/// ChaCha20 generator keyed by SHA-256(`text`) on the given stream.
pub fn content_rng(text: &str, stream: u64) -> ChaCha20Rng {
    let digest: [u8; 32] = Sha256::digest(text.as_bytes()).into();
    let mut rng = ChaCha20Rng::from_seed(digest);
    rng.set_stream(stream);
    rng
}

impl EmbeddingProvider for SeededEmbeddingProvider {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut rng = content_rng(text, EMBEDDING_STREAM);
        (0..self.dim)
            .map(|_| {
                let x: f64 = rng.gen_range(-1.0..=1.0);
                ((x * 10_000.0).round() / 10_000.0) as f32
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.dim
    }
}
