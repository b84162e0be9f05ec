//! Request handlers and wire types.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use recall_ingest::IngestReport;
use recall_retrieval::SearchRequest;
use recall_types::{Observation, ObservationCandidate};

use crate::error::{ApiError, INVALID_LIMIT_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of `POST /api/index`.
#[derive(Debug, Deserialize)]
pub struct IndexRequest {
    #[serde(default)]
    pub documents: Vec<ObservationCandidate>,
}

/// Query string of `GET /api/search/semantic`.
///
/// `limit` arrives as a raw string so that a non-numeric value produces
/// the same error shape as every other validation failure.
#[derive(Debug, Deserialize)]
pub struct SemanticSearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub project: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Observation>,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Index a batch of observations.
pub async fn index_documents(
    State(state): State<AppState>,
    Json(request): Json<IndexRequest>,
) -> Result<Json<IngestReport>, ApiError> {
    debug!(documents = request.documents.len(), "index request");
    let report = state.pipeline.ingest(request.documents).await?;
    Ok(Json(report))
}

/// Embed the query text and return the nearest stored observations.
pub async fn semantic_search(
    State(state): State<AppState>,
    Query(params): Query<SemanticSearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mut request = SearchRequest::new(params.q.unwrap_or_default());
    if let Some(raw) = params.limit {
        let limit = raw
            .parse::<usize>()
            .map_err(|_| ApiError::BadRequest(INVALID_LIMIT_MESSAGE.to_string()))?;
        request = request.with_limit(limit);
    }
    if let Some(project) = params.project {
        request = request.with_project(project);
    }
    if let Some(kind) = params.kind {
        request = request.with_kind(kind);
    }

    let outcome = state.search.search(request).await?;
    let count = outcome.count();
    Ok(Json(SearchResponse {
        query: outcome.query,
        count,
        results: outcome.results,
    }))
}

/// Reserved: similarity search seeded by a stored observation's vector.
pub async fn similar_observations(Path(id): Path<String>) -> impl IntoResponse {
    debug!(observation = %id, "similarity search by id requested");
    ApiError::NotImplemented
}
