//! Configuration management for Warden
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Base URL of the upstream generation API (up to the models segment)
    pub generation_api_url: String,
    /// Model identifier appended to the base URL
    pub generation_model: String,
    /// Upstream API key; absence puts the gateway into degraded mode
    pub generation_api_key: Option<String>,

    /// Whether the authentication stage is enabled
    pub auth_required: bool,
    /// JSON-encoded identity-service credential bundle; parsed once at startup
    pub identity_credentials: Option<String>,

    /// Maximum upstream attempts per request
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("WARDEN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("WARDEN_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid WARDEN_PORT")?,

            generation_api_url: env::var("GENERATION_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/models".to_string()
            }),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            generation_api_key: env::var("GENERATION_API_KEY").ok(),

            auth_required: env::var("WARDEN_AUTH")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            identity_credentials: env::var("IDENTITY_CREDENTIALS").ok(),

            max_retries: env::var("WARDEN_MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("Invalid WARDEN_MAX_RETRIES")?,
            retry_base_delay_ms: env::var("WARDEN_RETRY_BASE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("Invalid WARDEN_RETRY_BASE_DELAY_MS")?,
        })
    }
}
