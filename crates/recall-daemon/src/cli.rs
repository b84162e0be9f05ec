//! CLI argument parsing for the recall daemon.
//!
//! CLI flags override every other config source.

use clap::{Parser, Subcommand};

/// Agent Recall Daemon
///
/// A local semantic index over agent activity observations.
#[derive(Parser, Debug)]
#[command(name = "recall-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/agent-recall/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Daemon commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the recall daemon
    Start {
        /// Run in foreground (don't daemonize)
        #[arg(short, long)]
        foreground: bool,

        /// Override HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override database path
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Stop the running daemon
    Stop,

    /// Show daemon status
    Status,

    /// Check a running daemon's health endpoint
    Health {
        /// Base URL of the daemon
        #[arg(short, long, default_value = "http://127.0.0.1:9877")]
        url: String,
    },

    /// Run a semantic search against a running daemon
    Search {
        /// Query text
        query: String,

        /// Base URL of the daemon
        #[arg(short, long, default_value = "http://127.0.0.1:9877")]
        url: String,

        /// Maximum results
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Restrict results to this project
        #[arg(long)]
        project: Option<String>,

        /// Restrict results to this observation type
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_start_foreground() {
        let cli = Cli::parse_from(["recall-daemon", "start", "--foreground"]);
        match cli.command {
            Commands::Start { foreground, .. } => assert!(foreground),
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_start_with_port() {
        let cli = Cli::parse_from(["recall-daemon", "start", "-p", "9999"]);
        match cli.command {
            Commands::Start { port, .. } => assert_eq!(port, Some(9999)),
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["recall-daemon", "--config", "/path/to/config.toml", "start"]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
    }

    #[test]
    fn test_cli_status() {
        let cli = Cli::parse_from(["recall-daemon", "status"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_cli_stop() {
        let cli = Cli::parse_from(["recall-daemon", "stop"]);
        assert!(matches!(cli.command, Commands::Stop));
    }

    #[test]
    fn test_cli_start_with_db_path() {
        let cli = Cli::parse_from(["recall-daemon", "start", "--db-path", "/custom/db"]);
        match cli.command {
            Commands::Start { db_path, .. } => assert_eq!(db_path, Some("/custom/db".to_string())),
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_with_log_level() {
        let cli = Cli::parse_from(["recall-daemon", "--log-level", "debug", "start"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_search_defaults() {
        let cli = Cli::parse_from(["recall-daemon", "search", "deploy notes"]);
        match cli.command {
            Commands::Search {
                query,
                url,
                limit,
                project,
                kind,
            } => {
                assert_eq!(query, "deploy notes");
                assert_eq!(url, "http://127.0.0.1:9877");
                assert_eq!(limit, 10);
                assert!(project.is_none());
                assert!(kind.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_with_filters() {
        let cli = Cli::parse_from([
            "recall-daemon",
            "search",
            "retry loop",
            "--project",
            "alpha",
            "--type",
            "prompt",
            "--limit",
            "3",
        ]);
        match cli.command {
            Commands::Search {
                limit,
                project,
                kind,
                ..
            } => {
                assert_eq!(limit, 3);
                assert_eq!(project.as_deref(), Some("alpha"));
                assert_eq!(kind.as_deref(), Some("prompt"));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_health_with_url() {
        let cli = Cli::parse_from(["recall-daemon", "health", "-u", "http://localhost:9999"]);
        match cli.command {
            Commands::Health { url } => assert_eq!(url, "http://localhost:9999"),
            _ => panic!("Expected Health command"),
        }
    }
}
