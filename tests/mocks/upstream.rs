//! Mock upstream generation API for testing
//!
//! Provides wiremock-based mocks for the generateContent endpoint:
//! POST /{model}:generateContent?key={api_key}.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::common::constants;

/// Mock upstream generation API wrapper
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn generate_path() -> String {
        format!("/{}:generateContent", constants::TEST_MODEL)
    }

    /// Get all generation requests received by the mock
    pub async fn generate_requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == Self::generate_path())
            .collect()
    }

    /// Mock a successful generation returning the given text
    ///
    /// Matches only when the API key travels as the `key` query parameter,
    /// so a passing test also proves credential propagation.
    pub async fn mock_generate_text(&self, text: &str) {
        self.mock_generate_body(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": text}]
                }
            }]
        }))
        .await;
    }

    /// Mock a successful (2xx) generation with an arbitrary body
    pub async fn mock_generate_body(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .and(query_param("key", constants::TEST_GENERATION_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a persistent upstream failure with the given status and body
    pub async fn mock_generate_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock an upstream that fails `failures` times, then succeeds with the
    /// given text. Relies on wiremock evaluating mocks in mount order: the
    /// failure mock stops matching once exhausted and requests fall through
    /// to the success mock.
    pub async fn mock_generate_flaky(&self, failures: u64, status: u16, text: &str) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "temporarily overloaded"
            })))
            .up_to_n_times(failures)
            .mount(&self.server)
            .await;

        self.mock_generate_text(text).await;
    }
}
