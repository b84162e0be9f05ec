//! Shared application state for HTTP handlers.

use std::sync::Arc;

use recall_embeddings::Embedder;
use recall_ingest::IngestPipeline;
use recall_retrieval::SemanticSearch;
use recall_store::VectorStore;

/// State shared across all request handlers.
///
/// Cloning is cheap; both services are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IngestPipeline>,
    pub search: Arc<SemanticSearch>,
}

impl AppState {
    /// Wire the ingestion pipeline and search service to a shared store.
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<VectorStore>) -> Self {
        Self {
            pipeline: Arc::new(IngestPipeline::new(store.clone())),
            search: Arc::new(SemanticSearch::new(embedder, store)),
        }
    }
}
