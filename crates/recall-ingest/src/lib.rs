//! # recall-ingest
//!
//! Ingestion pipeline for Agent Recall.
//!
//! Accepts batches of caller-submitted observation candidates, keeps only
//! the valid ones, and forwards them to the vector store in a single
//! insert. Invalid records are dropped silently and surface only through
//! the aggregate skipped count.

pub mod error;
pub mod pipeline;

pub use error::IngestError;
pub use pipeline::{IngestPipeline, IngestReport};
