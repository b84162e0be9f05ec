//! Ingestion error types.

use thiserror::Error;

use recall_store::StoreError;

/// Errors that can occur during batch ingestion.
///
/// The empty-batch and no-valid-documents conditions are distinct so the
/// HTTP layer can name the failure precisely; both are detected before the
/// store is touched.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request contained no documents at all
    #[error("No documents provided")]
    EmptyBatch,

    /// Every document in the batch failed validation
    #[error("No valid documents provided")]
    NoValidDocuments,

    /// The store rejected the valid subset
    #[error(transparent)]
    Store(#[from] StoreError),
}
