//! Dashboard-side HTTP client
//!
//! Typed client for the gateway's public surface, used by the terminal
//! dashboard and by anything else that wants to drive the gateway from
//! outside the process. Failures are reported, never retried automatically:
//! connection problems surface as `Transport`, bodies missing expected
//! fields as `MalformedResponse`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::api::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, HealthResponse,
};
use crate::error::{GatewayError, Result};
use crate::metrics::MetricsSnapshot;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the gateway endpoints
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            GatewayError::InvalidConfiguration {
                reason: format!("failed to build HTTP client: {e}"),
            }
        })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Poll `GET /health`
    ///
    /// # Errors
    ///
    /// `Transport` when the gateway is unreachable or answers non-200,
    /// `MalformedResponse` when the body does not parse.
    pub fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health")
    }

    /// Poll `GET /metrics` for a counter snapshot
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`GatewayClient::health`].
    pub fn metrics(&self) -> Result<MetricsSnapshot> {
        self.get_json("/metrics")
    }

    /// Post a chat completion
    ///
    /// Validates the response shape: a response without any choice is
    /// reported as `MalformedResponse`.
    ///
    /// # Errors
    ///
    /// `Transport` on connection failure or error status,
    /// `MalformedResponse` on an unparseable or choice-less body.
    pub fn complete(
        &self,
        model: Option<String>,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/api/v1/chat/completions", self.base_url);
        let request = ChatCompletionRequest { model, messages };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| GatewayError::Transport {
                reason: e.to_string(),
            })?;

        let completion: ChatCompletionResponse =
            response.json().map_err(|e| GatewayError::MalformedResponse {
                reason: format!("invalid completion body: {e}"),
            })?;

        if completion.choices.is_empty() {
            return Err(GatewayError::MalformedResponse {
                reason: "choices array is empty".to_string(),
            });
        }
        Ok(completion)
    }

    /// GET a JSON body from `path`
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| GatewayError::Transport {
                reason: e.to_string(),
            })?;

        response.json().map_err(|e| GatewayError::MalformedResponse {
            reason: format!("invalid body from {path}: {e}"),
        })
    }
}
