//! Embedder trait.
//!
//! Defines the interface for turning query text into an embedding vector.

use async_trait::async_trait;

use crate::error::EmbeddingError;

/// Trait for embedding backends.
///
/// Implementations must be thread-safe (Send + Sync) so a single instance
/// can serve concurrent search requests.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// The dimension of vectors this embedder produces
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    ///
    /// The returned vector always has exactly [`Embedder::dimension`]
    /// elements; backends must reject anything else.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
