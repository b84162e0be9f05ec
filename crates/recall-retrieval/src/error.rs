//! Retrieval error types.

use thiserror::Error;

use recall_embeddings::EmbeddingError;
use recall_store::StoreError;

/// Errors that can occur during semantic search.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// No query text was supplied
    #[error("Query text is required")]
    MissingQuery,

    /// The requested limit cannot yield results
    #[error("Search limit must be a positive integer")]
    InvalidLimit,

    /// Query embedding failed
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// The store rejected or failed the search
    #[error(transparent)]
    Store(#[from] StoreError),
}
