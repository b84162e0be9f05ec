//! # recall-store
//!
//! LanceDB-backed storage for Agent Recall observations.
//!
//! This crate owns the `observations` table: its schema, its creation on
//! first use, batch inserts, and nearest-neighbor search with optional
//! metadata predicates. It is the only layer that talks to the storage
//! engine, and it enforces the one-table-one-dimension invariant before
//! any engine call.
//!
//! ## Features
//! - Empty-table bootstrap with an explicit Arrow schema (no sentinel rows)
//! - All-or-nothing batch insert via a single record batch
//! - Vector search with safely quoted equality filters
//! - Bounded timeouts around every engine round-trip

pub mod error;
pub mod predicate;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use store::{StoreStats, VectorStore, OBSERVATIONS_TABLE};
