//! Agent Recall Daemon
//!
//! A local semantic index over agent activity observations.
//!
//! # Usage
//!
//! ```bash
//! recall-daemon start [--foreground] [--port PORT] [--db-path PATH]
//! recall-daemon stop
//! recall-daemon status
//! recall-daemon health [--url URL]
//! recall-daemon search "query text" [--limit N] [--project P] [--type T]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/agent-recall/config.toml)
//! 3. Environment variables (RECALL_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use recall_daemon::{
    check_health, run_search, show_status, start_daemon, stop_daemon, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            foreground,
            port,
            db_path,
        } => {
            start_daemon(
                cli.config.as_deref(),
                foreground,
                port,
                db_path.as_deref(),
                cli.log_level.as_deref(),
            )
            .await?;
        }
        Commands::Stop => {
            stop_daemon()?;
        }
        Commands::Status => {
            show_status()?;
        }
        Commands::Health { url } => {
            check_health(&url).await?;
        }
        Commands::Search {
            query,
            url,
            limit,
            project,
            kind,
        } => {
            run_search(&url, &query, limit, project.as_deref(), kind.as_deref()).await?;
        }
    }

    Ok(())
}
