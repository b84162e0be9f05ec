//! Health endpoint E2E tests.

use pretty_assertions::assert_eq;

use e2e_tests::TestHarness;

#[tokio::test]
async fn test_health_returns_ok_status() {
    let harness = TestHarness::start().await;

    let (status, body) = harness.get("/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_is_stable_across_requests() {
    let harness = TestHarness::start().await;

    for _ in 0..3 {
        let (status, body) = harness.get("/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
    }
}
