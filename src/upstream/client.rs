//! Upstream generation client
//!
//! Forwards `generateContent` requests to the upstream API with bounded
//! retries and exponential backoff. Any non-2xx response or transport error
//! takes the same backoff-and-retry path; the last attempt's outcome,
//! success or failure, is what the caller sees.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    retry::RetryPolicy,
    routes::metrics::record_upstream_retry,
    upstream::models::{GenerateContentRequest, GenerateContentResponse},
};

/// Upstream generation API client
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    policy: RetryPolicy,
}

impl GenerationClient {
    /// Create a new generation client
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        model: String,
        api_key: String,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
            policy,
        }
    }

    /// Build the client from configuration; `None` when no API key is set,
    /// which the gateway surfaces as its degraded mode
    pub fn from_config(client: reqwest::Client, config: &Config) -> Option<Self> {
        let api_key = config.generation_api_key.clone()?;
        Some(Self::new(
            client,
            config.generation_api_url.clone(),
            config.generation_model.clone(),
            api_key,
            RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_base_delay_ms),
            ),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a generation request, retrying per the configured policy.
    ///
    /// Attempts run sequentially, never in parallel. The final non-success
    /// body is logged and passed through to the caller verbatim.
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let mut attempt: u32 = 0;
        loop {
            debug!(attempt, url = %url, "Sending generation request upstream");

            let result = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .header(CONTENT_TYPE, "application/json")
                .json(request)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let body = response.text().await?;
                    debug!(attempt, "Upstream returned success");
                    return Ok(serde_json::from_str(&body)?);
                }
                Ok(response) => {
                    let status = response.status();
                    if self.policy.is_final(attempt) {
                        let body = response.text().await.unwrap_or_default();
                        error!(
                            status = %status,
                            body = %body,
                            attempts = attempt + 1,
                            "Upstream request failed, giving up"
                        );
                        let details = serde_json::from_str(&body)
                            .unwrap_or_else(|_| Value::String(body));
                        return Err(AppError::UpstreamService {
                            status: status.as_u16(),
                            details,
                        });
                    }
                    warn!(status = %status, attempt, "Upstream returned non-success, backing off");
                }
                Err(e) => {
                    if self.policy.is_final(attempt) {
                        error!(error = %e, attempts = attempt + 1, "Upstream request failed, giving up");
                        return Err(AppError::Http(e));
                    }
                    warn!(error = %e, attempt, "Upstream request error, backing off");
                }
            }

            record_upstream_retry(&self.model);
            tokio::time::sleep(self.policy.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}
