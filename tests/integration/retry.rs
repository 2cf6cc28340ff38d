//! Upstream retry behavior integration tests
//!
//! Tests for the bounded retry-with-backoff loop:
//! - Transient upstream failures are retried and can recover
//! - The final attempt's outcome is surfaced verbatim when retries exhaust
//! - 2xx responses stop the loop immediately, even when unusable

use std::time::{Duration, Instant};

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::common::{constants, test_data, TestHarness};

#[tokio::test]
async fn test_retry_recovers_after_transient_failures() {
    let harness = TestHarness::new().await;

    harness
        .identity
        .mock_verify_success(constants::TEST_SUBJECT_ID)
        .await;
    // Two failures, then success: recoverable within 3 attempts
    harness.upstream.mock_generate_flaky(2, 500, "recovered").await;

    let start = Instant::now();
    let response = harness
        .server
        .post("/v1/generate")
        .add_header(header::AUTHORIZATION, harness.auth_header().parse().unwrap())
        .json(&test_data::valid_request())
        .await;
    let elapsed = start.elapsed();

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({"text": "recovered"}));

    let requests = harness.upstream.generate_requests().await;
    assert_eq!(requests.len(), 3, "Two failed attempts plus the success");

    // Jitter-free exponential backoff: base + 2*base between the attempts
    let min_wait = Duration::from_millis(constants::TEST_BASE_DELAY_MS * 3);
    assert!(
        elapsed >= min_wait,
        "Expected at least {min_wait:?} of backoff, saw {elapsed:?}"
    );
}

#[tokio::test]
async fn test_retry_exhaustion_surfaces_final_outcome() {
    let harness = TestHarness::new().await;

    harness
        .identity
        .mock_verify_success(constants::TEST_SUBJECT_ID)
        .await;
    harness
        .upstream
        .mock_generate_error(429, json!({"error": "rate limited"}))
        .await;

    let response = harness
        .server
        .post("/v1/generate")
        .add_header(header::AUTHORIZATION, harness.auth_header().parse().unwrap())
        .json(&test_data::valid_request())
        .await;

    // The last attempt's status and body are passed through verbatim
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json();
    assert_eq!(body["error"], "AI Service Error");
    assert_eq!(body["details"], json!({"error": "rate limited"}));

    let requests = harness.upstream.generate_requests().await;
    assert_eq!(requests.len(), 3, "All three attempts should be spent");
}

#[tokio::test]
async fn test_no_retry_on_first_success() {
    let harness = TestHarness::new().await;

    harness
        .identity
        .mock_verify_success(constants::TEST_SUBJECT_ID)
        .await;
    harness.upstream.mock_generate_text("hi").await;

    let response = harness
        .server
        .post("/v1/generate")
        .add_header(header::AUTHORIZATION, harness.auth_header().parse().unwrap())
        .json(&test_data::valid_request())
        .await;

    response.assert_status_ok();

    let requests = harness.upstream.generate_requests().await;
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_unusable_success_is_not_retried() {
    let harness = TestHarness::new().await;

    harness
        .identity
        .mock_verify_success(constants::TEST_SUBJECT_ID)
        .await;
    // 2xx with no extractable text: the loop stops, the translator fails
    harness.upstream.mock_generate_body(json!({})).await;

    let response = harness
        .server
        .post("/v1/generate")
        .add_header(header::AUTHORIZATION, harness.auth_header().parse().unwrap())
        .json(&test_data::valid_request())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let requests = harness.upstream.generate_requests().await;
    assert_eq!(requests.len(), 1, "A 2xx must never trigger a retry");
}
