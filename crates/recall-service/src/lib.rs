//! HTTP service for observation indexing and semantic search.
//!
//! Provides:
//! - `GET /health` liveness probe
//! - `POST /api/index` batch observation ingestion
//! - `GET /api/search/semantic` embedding-backed search with optional
//!   project and type filters
//! - `GET /api/search/similar/{id}` reserved, answers 501
//!
//! Errors cross the HTTP boundary as a stable `{"error": "..."}` JSON
//! body; internal detail stays in the logs.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{run_server, run_server_with_shutdown, serve_with_listener};
pub use state::AppState;
