//! # recall-retrieval
//!
//! Semantic search orchestration for Agent Recall.
//!
//! Ties the embedding client and the vector store together: a free-text
//! query is validated, embedded, combined with optional metadata
//! constraints, and executed against the store. Validation failures are
//! caught before any embedding or storage work happens.

pub mod error;
pub mod search;

pub use error::RetrievalError;
pub use search::{SearchOutcome, SearchRequest, SemanticSearch, DEFAULT_SEARCH_LIMIT};
