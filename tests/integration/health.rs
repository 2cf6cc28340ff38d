//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Full health check with configuration status
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestHarness;

#[tokio::test]
async fn test_liveness_always_ok() {
    let harness = TestHarness::new_without_api_key().await;

    let response = harness.server.get("/health/live").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_when_configured() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health/ready").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_degraded_without_api_key() {
    let harness = TestHarness::new_without_api_key().await;

    let response = harness.server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_readiness_degraded_with_misconfigured_identity() {
    let harness = TestHarness::new_misconfigured_identity().await;

    let response = harness.server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_full_health_report() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body.get("version").is_some(), "Report should carry a version");
    assert!(
        body.get("uptime_seconds").is_some(),
        "Report should carry uptime"
    );
    assert_eq!(body["checks"]["generation"]["status"], "healthy");
    assert_eq!(body["checks"]["identity"]["status"], "healthy");
}

#[tokio::test]
async fn test_full_health_reports_degraded_configuration() {
    let harness = TestHarness::new_without_api_key().await;

    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["generation"]["status"], "degraded");
    assert!(
        body["checks"]["generation"]["error"].is_string(),
        "Degraded check should name the missing configuration"
    );
}

#[tokio::test]
async fn test_health_requires_no_authentication() {
    let harness = TestHarness::new().await;

    // No Authorization header on any probe
    harness.server.get("/health").await.assert_status_ok();
    harness.server.get("/health/live").await.assert_status_ok();
    harness.server.get("/health/ready").await.assert_status_ok();
}
