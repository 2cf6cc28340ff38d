//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with configuration status
//! - `/health/ready` - Readiness probe
//! - `/health/live` - Liveness probe
//!
//! The gateway has no stateful dependencies; readiness reflects whether the
//! mandatory configuration (upstream key, identity credentials) is present.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{identity::VerifierState, AppState};

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual configuration check result
#[derive(Debug, Serialize)]
pub struct ConfigCheck {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Configuration checks collection
#[derive(Debug, Serialize)]
pub struct ConfigChecks {
    pub generation: ConfigCheck,
    pub identity: ConfigCheck,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub checks: ConfigChecks,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

fn check_generation(state: &AppState) -> ConfigCheck {
    match state.generation {
        Some(_) => ConfigCheck {
            status: HealthStatus::Healthy,
            error: None,
        },
        None => ConfigCheck {
            status: HealthStatus::Degraded,
            error: Some("GENERATION_API_KEY is not set".to_string()),
        },
    }
}

fn check_identity(state: &AppState) -> ConfigCheck {
    match state.verifier {
        VerifierState::Disabled | VerifierState::Ready(_) => ConfigCheck {
            status: HealthStatus::Healthy,
            error: None,
        },
        VerifierState::Misconfigured => ConfigCheck {
            status: HealthStatus::Degraded,
            error: Some("identity credentials are missing or invalid".to_string()),
        },
    }
}

/// Full health check endpoint
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let generation = check_generation(&state);
    let identity = check_identity(&state);

    let overall_status = if generation.status == HealthStatus::Degraded
        || identity.status == HealthStatus::Degraded
    {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: ConfigChecks {
            generation,
            identity,
        },
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe endpoint
///
/// Returns 200 OK only when the gateway is fully configured; a degraded
/// gateway answers 503 so orchestrators keep traffic away from it.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    let degraded = check_generation(&state).status == HealthStatus::Degraded
        || check_identity(&state).status == HealthStatus::Degraded;

    if degraded {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse {
                status: HealthStatus::Degraded,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
