//! Error types for Warden
//!
//! Every failure is converted to a structured JSON body with an explicit
//! HTTP status at the handler boundary. Internal diagnostic detail is logged
//! server-side only; the caller-facing strings below are a compatibility
//! contract and must not change. The one exception is the upstream's own
//! error payload, which is passed through in `details` for debuggability.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::identity::VerifyError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("service misconfigured: {0}")]
    ServiceMisconfigured(String),

    #[error("authorization header missing or invalid")]
    MissingCredential,

    #[error("access denied: {0}")]
    AccessDenied(#[from] VerifyError),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("upstream service error (status {status})")]
    UpstreamService {
        status: u16,
        details: serde_json::Value,
    },

    #[error("upstream response contained no text")]
    EmptyResponse,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode upstream response: {0}")]
    ResponseDecode(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Caller-facing error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", None)
            }
            AppError::ServiceMisconfigured(detail) => {
                error!(detail = %detail, "rejecting request: service is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Service is not configured.",
                    None,
                )
            }
            AppError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "Authorization header missing or invalid.",
                None,
            ),
            // All verification failures collapse into one external signal so
            // callers cannot distinguish forged, expired and revoked tokens.
            AppError::AccessDenied(cause) => {
                warn!(cause = %cause, "token verification failed");
                (
                    StatusCode::FORBIDDEN,
                    "Access denied: Token verification failed.",
                    None,
                )
            }
            AppError::MalformedPayload(detail) => {
                warn!(detail = %detail, "rejecting malformed payload");
                (StatusCode::BAD_REQUEST, "Missing content parts.", None)
            }
            AppError::UpstreamService { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "AI Service Error",
                Some(details),
            ),
            AppError::EmptyResponse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI response was empty.",
                None,
            ),
            AppError::Http(e) => {
                error!(error = %e, "upstream transport failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during fetch.",
                    None,
                )
            }
            AppError::ResponseDecode(e) => {
                error!(error = %e, "failed to decode upstream response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during fetch.",
                    None,
                )
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during fetch.",
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
