//! Batch ingestion pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use recall_store::VectorStore;
use recall_types::{Observation, ObservationCandidate};

use crate::error::IngestError;

/// Outcome of a successful ingest call.
///
/// `indexed + skipped` always equals the size of the submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Number of valid records stored
    pub indexed: usize,
    /// Number of invalid records dropped
    pub skipped: usize,
}

/// Validates observation batches and forwards the valid subset to storage.
pub struct IngestPipeline {
    store: Arc<VectorStore>,
}

impl IngestPipeline {
    pub fn new(store: Arc<VectorStore>) -> Self {
        Self { store }
    }

    /// Ingest a batch of candidates.
    ///
    /// Fails before touching storage when the batch is empty or no
    /// candidate passes validation. Otherwise exactly the valid subset is
    /// inserted; candidates without a timestamp are stamped with the
    /// ingestion time during conversion.
    pub async fn ingest(
        &self,
        candidates: Vec<ObservationCandidate>,
    ) -> Result<IngestReport, IngestError> {
        if candidates.is_empty() {
            return Err(IngestError::EmptyBatch);
        }

        let total = candidates.len();
        let valid: Vec<Observation> = candidates
            .into_iter()
            .filter_map(ObservationCandidate::into_observation)
            .collect();

        if valid.is_empty() {
            warn!(total, "ingest batch had no valid documents");
            return Err(IngestError::NoValidDocuments);
        }

        let skipped = total - valid.len();
        self.store.insert(&valid).await?;

        info!(indexed = valid.len(), skipped, "indexed observation batch");
        Ok(IngestReport {
            indexed: valid.len(),
            skipped,
        })
    }
}
