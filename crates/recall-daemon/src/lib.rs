//! Recall daemon library exports.
//!
//! This crate provides the CLI daemon binary for the agent-recall system.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `client`: HTTP helpers for querying a running daemon
//! - `commands`: Command implementations (start, stop, status)

pub mod cli;
pub mod client;
pub mod commands;

pub use cli::{Cli, Commands};
pub use client::{check_health, run_search};
pub use commands::{show_status, start_daemon, stop_daemon};
