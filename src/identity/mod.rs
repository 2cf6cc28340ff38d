//! Identity verification
//!
//! Validates caller bearer tokens against an external identity service.
//! The verifier sits behind a trait so the backend is pluggable and tests
//! can substitute a fake.

pub mod client;
pub mod models;

pub use client::{CredentialVerifier, IdentityClient};
pub use models::{IdentityCredentials, VerifiedPrincipal};

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

/// Why a credential was rejected. Logged server-side; never surfaced to the
/// caller, which sees a single undifferentiated denial.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("credential rejected by identity service")]
    Invalid,

    #[error("principal is revoked or disabled")]
    Revoked,

    #[error("identity service unreachable: {0}")]
    Unreachable(String),
}

/// Verifier state, decided once at startup and immutable thereafter
#[derive(Clone)]
pub enum VerifierState {
    /// Authentication stage disabled by configuration
    Disabled,
    /// Verifier configured and ready
    Ready(Arc<dyn CredentialVerifier>),
    /// Credential bundle absent or unparsable; every request fails closed
    /// until the process is restarted
    Misconfigured,
}

impl VerifierState {
    /// Build the verifier state from configuration.
    ///
    /// Never fails: a missing or unparsable credential bundle produces the
    /// explicit `Misconfigured` state instead of aborting startup.
    pub fn from_config(config: &Config, http_client: &reqwest::Client) -> Self {
        if !config.auth_required {
            info!("authentication stage disabled by configuration");
            return Self::Disabled;
        }

        match config.identity_credentials.as_deref() {
            None => {
                error!("IDENTITY_CREDENTIALS is not set; all requests will be rejected");
                Self::Misconfigured
            }
            Some(raw) => match IdentityCredentials::from_json(raw) {
                Ok(credentials) => Self::Ready(Arc::new(IdentityClient::new(
                    http_client.clone(),
                    &credentials,
                ))),
                Err(e) => {
                    error!(error = %e, "IDENTITY_CREDENTIALS did not parse; all requests will be rejected");
                    Self::Misconfigured
                }
            },
        }
    }

    pub fn is_misconfigured(&self) -> bool {
        matches!(self, Self::Misconfigured)
    }
}
