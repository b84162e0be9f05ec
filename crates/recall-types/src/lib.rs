//! # recall-types
//!
//! Shared domain types for the Agent Recall service.
//!
//! This crate defines the core data structures used throughout the system:
//! - Observations: immutable text+vector records submitted for indexing
//! - Search filters: structured metadata constraints for retrieval
//! - Settings: layered configuration for the daemon and service
//!
//! ## Usage
//!
//! ```rust
//! use recall_types::Observation;
//!
//! let obs = Observation::new("obs-1".to_string(), "hello".to_string(), vec![0.0; 384]);
//! assert!(obs.project.is_none());
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod observation;

pub use config::Settings;
pub use error::RecallError;
pub use filter::SearchFilter;
pub use observation::{Observation, ObservationCandidate};
