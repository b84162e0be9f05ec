//! Daemon CLI client E2E tests.
//!
//! Runs the `health` and `search` subcommand helpers against a live
//! server.

use pretty_assertions::assert_eq;
use serde_json::json;

use e2e_tests::{unique_id, TestHarness};
use recall_daemon::{check_health, run_search};

#[tokio::test]
async fn test_check_health_against_running_server() {
    let harness = TestHarness::start().await;

    let result = check_health(&harness.server.base_url).await;
    assert!(result.is_ok(), "health check failed: {:?}", result.err());
}

#[tokio::test]
async fn test_run_search_against_running_server() {
    let harness = TestHarness::start().await;

    let id = unique_id("e2e-cli");
    let documents = json!({
        "documents": [harness.document(&id, "wired up the metrics dashboard")]
    });
    let (status, _) = harness.post("/api/index", &documents).await;
    assert_eq!(status, 200);

    let result = run_search(
        &harness.server.base_url,
        "wired up the metrics dashboard",
        5,
        Some("e2e-test"),
        None,
    )
    .await;
    assert!(result.is_ok(), "search failed: {:?}", result.err());
}

#[tokio::test]
async fn test_run_search_reports_server_side_validation() {
    let harness = TestHarness::start().await;

    // Limit 0 is rejected by the server; the client surfaces the error
    let result = run_search(&harness.server.base_url, "anything", 0, None, None).await;
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("limit"),
        "Expected the limit error, got: {}",
        message
    );
}
