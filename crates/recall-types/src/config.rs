//! Configuration loading for agent-recall.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The config file lives at ~/.config/agent-recall/config.toml and every
//! key can be overridden through a `RECALL_*` environment variable.

use config::{Config, Environment, File};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::RecallError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the LanceDB storage directory
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Embedding dimension the observations table is bound to
    #[serde(default = "default_vector_dim")]
    pub vector_dim: usize,

    /// Interpreter used to run the embedding worker
    #[serde(default = "default_embed_command")]
    pub embed_command: String,

    /// Path to the embedding worker script
    #[serde(default = "default_embed_script")]
    pub embed_script: String,

    /// Maximum seconds to wait for the embedding worker
    #[serde(default = "default_embed_timeout_secs")]
    pub embed_timeout_secs: u64,

    /// Maximum seconds to wait for a storage round-trip
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_db_path() -> String {
    ProjectDirs::from("", "", "agent-recall")
        .map(|p| p.data_local_dir().join("lance"))
        .unwrap_or_else(|| PathBuf::from("./lance"))
        .to_string_lossy()
        .to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9877
}

fn default_vector_dim() -> usize {
    384
}

fn default_embed_command() -> String {
    "python3".to_string()
}

fn default_embed_script() -> String {
    "scripts/embed.py".to_string()
}

fn default_embed_timeout_secs() -> u64 {
    30
}

fn default_store_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
            vector_dim: default_vector_dim(),
            embed_command: default_embed_command(),
            embed_script: default_embed_script(),
            embed_timeout_secs: default_embed_timeout_secs(),
            store_timeout_secs: default_store_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/agent-recall/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (RECALL_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, RecallError> {
        let config_dir = ProjectDirs::from("", "", "agent-recall")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            // 1. Built-in defaults
            .set_default("db_path", default_db_path())
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("host", default_host())
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("port", default_port() as i64)
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("vector_dim", default_vector_dim() as i64)
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("embed_command", default_embed_command())
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("embed_script", default_embed_script())
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("embed_timeout_secs", default_embed_timeout_secs() as i64)
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("store_timeout_secs", default_store_timeout_secs() as i64)
            .map_err(|e| RecallError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| RecallError::Config(e.to_string()))?
            // 2. Default config file (~/.config/agent-recall/config.toml)
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        // 3. CLI-specified config file (higher precedence than default)
        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // 4. Environment variables (highest precedence before CLI flags)
        // Format: RECALL_DB_PATH, RECALL_PORT, RECALL_EMBED_SCRIPT, etc.
        // Settings keys are flat, so no nesting separator is configured;
        // the full var name after the prefix is the key.
        builder = builder.add_source(Environment::with_prefix("RECALL").try_parsing(true));

        let config = builder
            .build()
            .map_err(|e| RecallError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| RecallError::Config(e.to_string()))
    }

    /// Validate settings values after all override layers are applied.
    pub fn validate(&self) -> Result<(), RecallError> {
        if self.vector_dim == 0 {
            return Err(RecallError::InvalidInput(
                "vector_dim must be > 0".to_string(),
            ));
        }
        if self.embed_timeout_secs == 0 {
            return Err(RecallError::InvalidInput(
                "embed_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.store_timeout_secs == 0 {
            return Err(RecallError::InvalidInput(
                "store_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the socket address for the HTTP server
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Expand ~ in db_path to the actual home directory
    pub fn expanded_db_path(&self) -> PathBuf {
        if let Some(rest) = self.db_path.strip_prefix("~/") {
            if let Some(home) = home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.db_path)
    }
}

/// Get user's home directory
fn home_dir() -> Option<PathBuf> {
    UserDirs::new()
        .map(|u| u.home_dir().to_path_buf())
        .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
}
