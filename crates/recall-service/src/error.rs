//! HTTP error mapping.
//!
//! Domain errors are folded into [`ApiError`] before they reach the wire.
//! Client mistakes keep their message; internal failures are collapsed to
//! a short stable message with the diagnostic detail logged server-side.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use recall_ingest::IngestError;
use recall_retrieval::RetrievalError;

pub(crate) const MISSING_QUERY_MESSAGE: &str = "Query parameter \"q\" is required";
pub(crate) const INVALID_LIMIT_MESSAGE: &str =
    "Query parameter \"limit\" must be a positive integer";

/// Body shape shared by every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// An error ready to cross the HTTP boundary.
///
/// `Internal` carries its diagnostic detail separately from the message
/// sent to the client; the detail is logged when the response is built
/// and never echoed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },

    #[error("Not implemented yet")]
    NotImplemented,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { message, detail } => {
                error!(%detail, "{message}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyBatch | IngestError::NoValidDocuments => {
                ApiError::BadRequest(err.to_string())
            }
            IngestError::Store(e) => ApiError::Internal {
                message: "Indexing failed",
                detail: e.to_string(),
            },
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::MissingQuery => ApiError::BadRequest(MISSING_QUERY_MESSAGE.to_string()),
            RetrievalError::InvalidLimit => ApiError::BadRequest(INVALID_LIMIT_MESSAGE.to_string()),
            RetrievalError::Embedding(e) => ApiError::Internal {
                message: "Search failed",
                detail: e.to_string(),
            },
            RetrievalError::Store(e) => ApiError::Internal {
                message: "Search failed",
                detail: e.to_string(),
            },
        }
    }
}
