//! Deterministic mock embedder for tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embedder::Embedder;
use crate::error::EmbeddingError;

/// Embedder that derives vectors from a hash of the input text.
///
/// The same text always maps to the same unit-length vector, which makes
/// exact-match retrieval assertions possible without a real model. Call
/// counts are tracked so tests can assert an operation never reached the
/// embedding step.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    dimension: usize,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Create a mock embedder producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of embed calls made against this instance
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Compute the deterministic vector for a text without counting a call.
    ///
    /// Useful for preparing ingestion payloads whose vectors must match a
    /// later query embedding exactly.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut values: Vec<f32> = (0..self.dimension)
            .map(|i| {
                let mut hasher = DefaultHasher::new();
                text.hash(&mut hasher);
                i.hash(&mut hasher);
                // Map the hash onto [-1.0, 1.0]
                (hasher.finish() % 2000) as f32 / 1000.0 - 1.0
            })
            .collect();

        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in values.iter_mut() {
                *v /= norm;
            }
        }
        values
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector_for(text))
    }
}
