//! End-to-end test infrastructure for agent-recall.
//!
//! Provides a shared TestHarness and helper functions for E2E tests
//! covering the full index-to-search pipeline over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use recall_embeddings::{Embedder, MockEmbedder};
use recall_service::{serve_with_listener, AppState};
use recall_store::VectorStore;

/// Embedding dimension used by the e2e fixtures.
pub const DIMENSION: usize = 384;

/// A running HTTP server over a fresh store.
///
/// Dropping the guard triggers graceful shutdown.
pub struct TestServer {
    pub base_url: String,
    /// Direct handle to the store behind the server, for verifying
    /// side effects without going through the API
    pub store: Arc<VectorStore>,
    /// Keeps temp dir alive for the lifetime of the server
    pub _temp_dir: tempfile::TempDir,
    _shutdown: oneshot::Sender<()>,
}

/// Start an HTTP server with the given embedder on an ephemeral port.
pub async fn spawn_server(embedder: Arc<dyn Embedder>, dimension: usize) -> TestServer {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(
        VectorStore::connect(
            &temp_dir.path().join("lance"),
            dimension,
            Duration::from_secs(30),
        )
        .await
        .expect("Failed to open test store"),
    );
    let state = AppState::new(embedder, store.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve_with_listener(listener, state, async {
        rx.await.ok();
    }));

    TestServer {
        base_url: format!("http://{}", addr),
        store,
        _temp_dir: temp_dir,
        _shutdown: tx,
    }
}

/// Shared test harness for E2E tests.
///
/// Runs the HTTP server with a deterministic mock embedder and exposes
/// request helpers that return `(status, body)` pairs.
pub struct TestHarness {
    pub server: TestServer,
    pub embedder: Arc<MockEmbedder>,
    pub client: reqwest::Client,
}

impl TestHarness {
    /// Start a server on an ephemeral port and wait until it is healthy.
    pub async fn start() -> Self {
        let embedder = Arc::new(MockEmbedder::new(DIMENSION));
        let server = spawn_server(embedder.clone(), DIMENSION).await;
        let harness = Self {
            server,
            embedder,
            client: reqwest::Client::new(),
        };
        harness.wait_until_healthy().await;
        harness
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url, path)
    }

    async fn wait_until_healthy(&self) {
        for _ in 0..10 {
            if let Ok(response) = self.client.get(self.url("/health")).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("Server not ready");
    }

    /// GET a path and decode the JSON body.
    pub async fn get(&self, path: &str) -> (u16, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        let status = response.status().as_u16();
        let body = response.json().await.expect("Non-JSON response body");
        (status, body)
    }

    /// POST a JSON body to a path and decode the JSON response.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> (u16, serde_json::Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed");
        let status = response.status().as_u16();
        let body = response.json().await.expect("Non-JSON response body");
        (status, body)
    }

    /// Build a complete observation document whose vector comes from the
    /// mock embedder, so a later search for the same text ranks it first.
    pub fn document(&self, id: &str, text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "text": text,
            "vector": self.embedder.vector_for(text),
            "project": "e2e-test",
            "session_id": "e2e-session",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "type": "prompt",
        })
    }
}

/// Create a unique document id with a recognizable prefix.
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, ulid::Ulid::new())
}
