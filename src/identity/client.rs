//! Identity service client
//!
//! HTTP client for verifying caller credentials against the identity
//! service.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, error, instrument, warn};

use super::{
    models::{IdentityCredentials, PrincipalRecord, VerifiedPrincipal},
    VerifyError,
};

/// Anything that can turn a bearer token into a verified principal
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedPrincipal, VerifyError>;
}

/// Identity service client
pub struct IdentityClient {
    client: reqwest::Client,
    verify_url: String,
    service_key: String,
}

impl IdentityClient {
    /// Create a new identity client from a parsed credential bundle
    pub fn new(client: reqwest::Client, credentials: &IdentityCredentials) -> Self {
        Self {
            client,
            verify_url: credentials.verify_url.clone(),
            service_key: credentials.service_key.clone(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for IdentityClient {
    #[instrument(skip_all, fields(token_len = token.len()))]
    async fn verify(&self, token: &str) -> Result<VerifiedPrincipal, VerifyError> {
        let url = format!("{}/v1/principals/me", self.verify_url);

        debug!(url = %url, "Verifying credential with identity service");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header("x-service-key", &self.service_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach identity service");
                VerifyError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        debug!(status = %status, "Identity service response status");

        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Identity service rejected credential");
            return Err(VerifyError::Invalid);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Identity service request failed");
            return Err(VerifyError::Unreachable(format!(
                "identity service error {}",
                status
            )));
        }

        let record: PrincipalRecord = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse identity service response");
            VerifyError::Unreachable(e.to_string())
        })?;

        let principal = record.into_principal()?;
        debug!(subject_id = %principal.subject_id, "Credential verified");
        Ok(principal)
    }
}
