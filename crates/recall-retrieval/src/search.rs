//! Semantic search over stored observations.

use std::sync::Arc;

use tracing::debug;

use recall_embeddings::Embedder;
use recall_store::VectorStore;
use recall_types::{Observation, SearchFilter};

use crate::error::RetrievalError;

/// Result limit applied when the caller does not specify one.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A semantic search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query to embed and match against stored vectors
    pub query: String,
    /// Maximum number of results
    pub limit: usize,
    /// Restrict results to this project
    pub project: Option<String>,
    /// Restrict results to this observation category
    pub kind: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            project: None,
            kind: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Outcome of a semantic search: the echoed query plus ordered results.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The query text as submitted
    pub query: String,
    /// Matching observations, most similar first
    pub results: Vec<Observation>,
}

impl SearchOutcome {
    /// Number of results returned
    pub fn count(&self) -> usize {
        self.results.len()
    }
}

/// Orchestrates query embedding, filter composition, and store search.
pub struct SemanticSearch {
    embedder: Arc<dyn Embedder>,
    store: Arc<VectorStore>,
}

impl SemanticSearch {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Execute a semantic search.
    ///
    /// Request validation happens first: an empty query or a zero limit
    /// fails before the embedder or the store is consulted.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, RetrievalError> {
        if request.query.trim().is_empty() {
            return Err(RetrievalError::MissingQuery);
        }
        if request.limit == 0 {
            return Err(RetrievalError::InvalidLimit);
        }

        debug!(query = %request.query, limit = request.limit, "semantic search");

        let vector = self.embedder.embed(&request.query).await?;

        let mut filter = SearchFilter::new();
        if let Some(project) = &request.project {
            filter = filter.equals("project", project.as_str());
        }
        if let Some(kind) = &request.kind {
            filter = filter.equals("type", kind.as_str());
        }
        let filter = (!filter.is_empty()).then_some(filter);

        let results = self
            .store
            .search(&vector, request.limit, filter.as_ref())
            .await?;

        Ok(SearchOutcome {
            query: request.query,
            results,
        })
    }
}
