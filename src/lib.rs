//! Warden - Authenticated forwarding gateway for LLM text generation
//!
//! This library provides the core functionality for the Warden gateway.
//! It verifies caller credentials against an external identity service,
//! shapes inbound payloads into the upstream generation schema, and calls
//! the upstream API with bounded retries.

pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod payload;
pub mod retry;
pub mod routes;
pub mod upstream;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::warn;

pub use crate::config::Config;
pub use crate::identity::{CredentialVerifier, IdentityClient, VerifiedPrincipal, VerifierState};
pub use crate::retry::RetryPolicy;
pub use crate::upstream::GenerationClient;

/// Application state shared across all request handlers
///
/// Built once at startup and read-only thereafter. Missing secrets do not
/// abort the process; they surface as explicit degraded state that the
/// request path rejects with a misconfiguration error.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Credential verifier state (authenticated variant)
    pub verifier: VerifierState,
    /// Upstream client; `None` when the API key is missing
    pub generation: Option<Arc<GenerationClient>>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        // Decide the verifier state once; it never changes until restart
        let verifier = VerifierState::from_config(&config, &http_client);

        // Initialize the upstream client, or degrade without one
        let generation = GenerationClient::from_config(http_client.clone(), &config).map(Arc::new);
        if generation.is_none() {
            warn!("GENERATION_API_KEY is not set; all generation requests will be rejected");
        }

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            verifier,
            generation,
        })
    }

    /// Create a new application state for testing with injected collaborators
    ///
    /// Lets integration tests point the gateway at wiremock servers and
    /// substitute fake verifiers without touching the environment.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(
        config: Config,
        verifier: VerifierState,
        generation: Option<Arc<GenerationClient>>,
    ) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            start_time: Instant::now(),
            verifier,
            generation,
        }
    }
}
