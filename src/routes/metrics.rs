//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "warden_requests_total",
        "Total number of gateway requests processed"
    );
    metrics::describe_counter!(
        "warden_upstream_retries_total",
        "Total number of retried upstream attempts"
    );
    metrics::describe_histogram!(
        "warden_request_duration_seconds",
        "Gateway request duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a completed gateway request
pub fn record_request(outcome: &str, model: &str, duration_secs: f64) {
    metrics::counter!("warden_requests_total", "outcome" => outcome.to_string(), "model" => model.to_string())
        .increment(1);
    metrics::histogram!("warden_request_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// Record a retried upstream attempt
pub fn record_upstream_retry(model: &str) {
    metrics::counter!("warden_upstream_retries_total", "model" => model.to_string()).increment(1);
}
