//! Generation endpoint
//!
//! The single gateway operation: validate the inbound payload, shape it
//! into the upstream schema, call the upstream with retries, and normalize
//! the outcome into the caller-facing contract.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    identity::VerifiedPrincipal,
    payload::validate_payload,
    routes::metrics::record_request,
    upstream::GenerateContentRequest,
    AppState,
};

/// Successful generation response body
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Handle generation requests
pub async fn generate(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4();

    // Present only on the authenticated variant (set by the auth middleware)
    let principal = request.extensions().get::<VerifiedPrincipal>().cloned();

    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read request body: {}", e)))?;

    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::MalformedPayload(format!("body is not valid JSON: {}", e)))?;

    let payload = validate_payload(&body)?;

    // The config gate rejects unconfigured deployments before this point.
    let client = state.generation.as_ref().ok_or_else(|| {
        AppError::ServiceMisconfigured("GENERATION_API_KEY is not set".to_string())
    })?;

    info!(
        request_id = %request_id,
        parts = payload.parts.len(),
        subject_id = principal.as_ref().map(|p| p.subject_id.as_str()).unwrap_or("-"),
        "Forwarding generation request"
    );

    let upstream_request = GenerateContentRequest::from_payload(&payload);

    let response = match client.generate(&upstream_request).await {
        Ok(response) => response,
        Err(e) => {
            record_request("upstream_error", client.model(), start_time.elapsed().as_secs_f64());
            return Err(e);
        }
    };

    let text = match response.first_text() {
        Some(text) => text.to_owned(),
        None => {
            warn!(request_id = %request_id, "Upstream succeeded but returned no extractable text");
            record_request("empty_response", client.model(), start_time.elapsed().as_secs_f64());
            return Err(AppError::EmptyResponse);
        }
    };

    let duration = start_time.elapsed().as_secs_f64();
    record_request("success", client.model(), duration);

    info!(
        request_id = %request_id,
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Generation request completed"
    );

    Ok((StatusCode::OK, Json(GenerateResponse { text })).into_response())
}
