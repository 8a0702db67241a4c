//! Error types for the gateway and its clients

use thiserror::Error;

/// Result type alias using `GatewayError`
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors produced by the gateway core and the dashboard-side client
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The model backend failed to load or an invocation failed.
    ///
    /// Fatal at startup (the process refuses to serve traffic); surfaced as
    /// a 500 when it happens mid-request. Never retried.
    #[error("Model unavailable: {reason}")]
    ModelUnavailable {
        /// What went wrong in the backend
        reason: String,
    },

    /// Invalid configuration (listen address, flags)
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which setting was rejected and why
        reason: String,
    },

    /// Dashboard side: the gateway could not be reached
    #[error("Transport error: {reason}")]
    Transport {
        /// Underlying connection/timeout failure
        reason: String,
    },

    /// Dashboard side: the gateway answered with an unexpected body shape
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// Which expected field or shape was missing
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_display() {
        let err = GatewayError::ModelUnavailable {
            reason: "tokenizer failed to load".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Model unavailable: tokenizer failed to load"
        );
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = GatewayError::InvalidConfiguration {
            reason: "bad listen address".to_string(),
        };
        assert!(err.to_string().contains("bad listen address"));
    }

    #[test]
    fn test_transport_display() {
        let err = GatewayError::Transport {
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().starts_with("Transport error"));
    }

    #[test]
    fn test_malformed_response_display() {
        let err = GatewayError::MalformedResponse {
            reason: "choices array is empty".to_string(),
        };
        assert!(err.to_string().contains("choices array is empty"));
    }
}
