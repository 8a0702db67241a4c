//! # Passerelle
//!
//! Thin HTTP gateway exposing a chat-completion API in front of a causal
//! language model, with per-request metrics aggregation and a terminal
//! dashboard.
//!
//! The model runtime is an external collaborator behind the
//! [`model::CausalModel`] trait; the crate ships a deterministic demo
//! backend so the server and the tests run without any model weights.
//!
//! ## Example
//!
//! ```rust,ignore
//! use passerelle::api::{create_router, AppState};
//!
//! let state = AppState::demo();
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! request → metrics middleware → completion service → inference adapter
//!                │                                          │
//!                └── shared counters ←──────────────────────┘
//! ```
//!
//! The dashboard binary (`passerelle-monitor`) polls `/health` and
//! `/metrics` through [`client::GatewayClient`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // u64 -> f64 for averages is safe
#![allow(clippy::cast_possible_wrap)] // u64 -> i64 for timestamps is safe
#![allow(clippy::must_use_candidate)] // Not all methods need #[must_use]
#![allow(clippy::missing_errors_doc)] // Error sections kept where they add value
#![allow(clippy::float_cmp)] // Allow exact float comparisons in tests

pub mod api;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod infer;
pub mod metrics;
pub mod middleware;
pub mod model;

// Re-exports for convenience
pub use error::{GatewayError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
        assert!(!VERSION.is_empty());
    }
}
