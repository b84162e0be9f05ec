//! # recall-embeddings
//!
//! Query embedding generation for Agent Recall.
//!
//! Observations arrive with their vectors already attached, so only
//! free-text search queries need embedding at request time. Embeddings
//! are produced by an external worker process (by default the bundled
//! sentence-transformers script) spoken to over a JSON-lines protocol.
//!
//! ## Features
//! - `Embedder` trait decoupling retrieval from the embedding backend
//! - Subprocess worker client with a bounded per-call time budget
//! - Deterministic mock embedder for hermetic tests

pub mod embedder;
pub mod error;
pub mod mock;
pub mod worker;

pub use embedder::Embedder;
pub use error::EmbeddingError;
pub use mock::MockEmbedder;
pub use worker::WorkerEmbedder;
