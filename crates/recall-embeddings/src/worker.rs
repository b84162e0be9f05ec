//! Subprocess embedding worker client.
//!
//! Each call spawns a fresh worker process, writes a single JSON request
//! line to its stdin, closes stdin, and reads the whole stdout looking for
//! a JSON reply carrying a `vector`. The worker's stderr is diagnostic
//! only and a non-zero exit status by itself is not a failure; failure is
//! solely the inability to obtain a well-formed vector in time.
//!
//! Per-call process startup is on the critical path of every search. That
//! is acceptable at low query rates; the [`Embedder`] seam leaves room for
//! a pooled backend without touching callers.

use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use recall_types::Settings;

use crate::embedder::Embedder;
use crate::error::EmbeddingError;

/// Request line written to the worker's stdin.
#[derive(Serialize)]
struct WorkerRequest<'a> {
    id: &'a str,
    text: &'a str,
}

/// Reply object expected on the worker's stdout.
#[derive(Deserialize)]
struct WorkerReply {
    vector: Vec<f32>,
}

/// Embedder backed by an external worker process.
#[derive(Debug, Clone)]
pub struct WorkerEmbedder {
    command: String,
    script: String,
    dimension: usize,
    timeout: Duration,
}

impl WorkerEmbedder {
    /// Create a worker embedder.
    ///
    /// `command` is the interpreter (e.g. `python3`), `script` the worker
    /// program it runs. `timeout` bounds the whole spawn-to-reply round
    /// trip for one call.
    pub fn new(command: String, script: String, dimension: usize, timeout: Duration) -> Self {
        Self {
            command,
            script,
            dimension,
            timeout,
        }
    }

    /// Create a worker embedder from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.embed_command.clone(),
            settings.embed_script.clone(),
            settings.vector_dim,
            Duration::from_secs(settings.embed_timeout_secs),
        )
    }

    /// Scan worker stdout for the first line that parses as a reply.
    ///
    /// The bundled worker emits one JSON object per input line; scanning
    /// tolerates leading noise from interpreters that write warnings to
    /// stdout.
    fn parse_reply(&self, stdout: &str) -> Option<Vec<f32>> {
        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Ok(reply) = serde_json::from_str::<WorkerReply>(line) {
                return Some(reply.vector);
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl Embedder for WorkerEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = serde_json::to_string(&WorkerRequest { id: "query", text })
            .map_err(|e| EmbeddingError::Serialization(e.to_string()))?;

        debug!(command = %self.command, script = %self.script, "spawning embedding worker");

        let mut child = Command::new(&self.command)
            .arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                EmbeddingError::Spawn(format!("{} {}: {}", self.command, self.script, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EmbeddingError::Spawn("worker stdin not captured".to_string()))?;
        stdin.write_all(request.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        // Closing stdin signals end of input to the worker
        drop(stdin);

        // kill_on_drop reaps the child if the wait is abandoned here
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| EmbeddingError::Timeout(self.timeout.as_secs()))??;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "embedding worker diagnostics");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let vector = self.parse_reply(&stdout).ok_or_else(|| {
            EmbeddingError::MalformedOutput(format!(
                "no vector in worker output (status {}): {}",
                output.status,
                preview(&stdout)
            ))
        })?;

        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }
}

/// Truncate worker output for error messages.
fn preview(s: &str) -> String {
    const MAX_CHARS: usize = 200;
    if s.chars().count() <= MAX_CHARS {
        s.trim().to_string()
    } else {
        let head: String = s.chars().take(MAX_CHARS).collect();
        format!("{}...", head.trim())
    }
}
