//! Authentication middleware
//!
//! Extracts the caller's bearer token and verifies it against the identity
//! service, placing the verified principal into request extensions. When
//! the authentication stage is disabled by configuration, requests pass
//! through untouched.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::{error::AppError, identity::VerifierState, AppState};

/// Extract the Authorization header value and return the bearer token
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Hash a token for log correlation; raw tokens are never logged
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verifier = match &state.verifier {
        VerifierState::Disabled => return Ok(next.run(request).await),
        // The config gate rejects this case first; fail closed regardless.
        VerifierState::Misconfigured => {
            return Err(AppError::ServiceMisconfigured(
                "identity credentials are missing or invalid".to_string(),
            ))
        }
        VerifierState::Ready(verifier) => verifier.clone(),
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingCredential)?;

    let token = extract_bearer_token(auth_header).ok_or(AppError::MissingCredential)?;

    debug!(token_digest = %token_digest(token), "Processing authentication request");

    let principal = verifier.verify(token).await?;

    debug!(subject_id = %principal.subject_id, "Caller authenticated");

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
