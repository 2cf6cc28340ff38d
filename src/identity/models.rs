//! Identity service data models

use serde::Deserialize;
use serde_json::{Map, Value};

use super::VerifyError;

/// Credential bundle for the identity service, supplied as a JSON-encoded
/// environment variable and parsed once at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCredentials {
    pub verify_url: String,
    pub service_key: String,
}

impl IdentityCredentials {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Verified identity of the caller. Request-scoped; never persisted.
#[derive(Debug, Clone)]
pub struct VerifiedPrincipal {
    pub subject_id: String,
    pub claims: Map<String, Value>,
}

/// Wire model of the identity service's verification response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalRecord {
    pub subject_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub claims: Map<String, Value>,
}

impl PrincipalRecord {
    /// A record whose subject is null, empty or disabled names a principal
    /// that has been explicitly shut off, not an invalid token.
    pub fn into_principal(self) -> Result<VerifiedPrincipal, VerifyError> {
        match self.subject_id.filter(|s| !s.is_empty()) {
            Some(subject_id) if !self.disabled => Ok(VerifiedPrincipal {
                subject_id,
                claims: self.claims,
            }),
            _ => Err(VerifyError::Revoked),
        }
    }
}
