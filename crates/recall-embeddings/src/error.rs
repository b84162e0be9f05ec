//! Embedding error types.

use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Worker process could not be started
    #[error("Failed to spawn embedding worker: {0}")]
    Spawn(String),

    /// IO error while talking to the worker
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker produced no parseable vector
    #[error("Malformed worker output: {0}")]
    MalformedOutput(String),

    /// Worker exceeded its time budget
    #[error("Embedding worker timed out after {0}s")]
    Timeout(u64),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}
