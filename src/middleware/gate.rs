//! Request gate middleware
//!
//! Two gates run ahead of authentication, mirroring the request lifecycle:
//! the method gate answers 405 for anything but POST, and the config gate
//! rejects every request with a single explicit misconfiguration error when
//! mandatory server configuration is missing. A broken deployment therefore
//! answers 500 regardless of what the caller sends.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

pub async fn method_gate(request: Request, next: Next) -> Result<Response, AppError> {
    if request.method() != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    Ok(next.run(request).await)
}

pub async fn config_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.generation.is_none() {
        return Err(AppError::ServiceMisconfigured(
            "GENERATION_API_KEY is not set".to_string(),
        ));
    }

    if state.verifier.is_misconfigured() {
        return Err(AppError::ServiceMisconfigured(
            "identity credentials are missing or invalid".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
