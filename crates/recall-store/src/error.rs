//! Storage error types.

use thiserror::Error;

/// Errors that can occur during vector store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not connect to the storage engine
    #[error("Connection error: {0}")]
    Connect(String),

    /// Table listing, creation, or open failed
    #[error("Table error: {0}")]
    Table(String),

    /// Arrow schema or record batch construction failed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Insert failed
    #[error("Insert error: {0}")]
    Insert(String),

    /// Search failed
    #[error("Search error: {0}")]
    Search(String),

    /// Vector length does not match the table dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector contains NaN or infinite values
    #[error("Invalid vector for observation '{0}': values must be finite")]
    InvalidVector(String),

    /// Engine round-trip exceeded its time budget
    #[error("Storage operation timed out after {0}s")]
    Timeout(u64),

    /// Insert called with no observations
    #[error("Empty batch: no observations to insert")]
    EmptyBatch,
}
