//! Gateway configuration
//!
//! Everything the service would otherwise hard-code (model identifier,
//! listen address, generation parameters, the sentinel delimiter) lives
//! here so the CLI can override it and tests can pin deterministic values.

use std::net::SocketAddr;

use crate::error::{GatewayError, Result};

/// Default model identifier advertised in responses
pub const DEFAULT_MODEL_ID: &str = "codegen-350M-mono";

/// Sentinel marker separating the prompt frame from the model's continuation
pub const DEFAULT_SENTINEL: &str = "---";

/// Configuration for the gateway process
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Model identifier used when a request does not declare one
    pub model_id: String,
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Additional token budget beyond the prompt length
    pub max_new_tokens: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether to sample (false = greedy decoding in the backend)
    pub do_sample: bool,
    /// Sentinel delimiter used to frame prompts
    pub sentinel: String,
}

impl GatewayConfig {
    /// Create a configuration with the stock defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_new_tokens: 256,
            temperature: 0.7,
            do_sample: true,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }

    /// Set the default model identifier
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the listen host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the listen port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the additional token budget
    #[must_use]
    pub fn with_max_new_tokens(mut self, max_new_tokens: usize) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Enable or disable sampling
    #[must_use]
    pub fn with_do_sample(mut self, do_sample: bool) -> Self {
        self.do_sample = do_sample;
        self
    }

    /// Set the sentinel delimiter
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Resolve the listen address
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when host/port do not parse to a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            GatewayError::InvalidConfiguration {
                reason: format!("invalid listen address {}:{}: {e}", self.host, self.port),
            }
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}
