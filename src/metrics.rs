//! Request metrics collection
//!
//! Process-wide counters for the gateway: total requests, server errors and
//! cumulative/average latency. The state is a cloneable handle injected into
//! the middleware and the `/metrics` endpoint at construction — never a
//! global. All fields of one request's update are applied under a single
//! lock acquisition so a concurrent reader can never observe a torn average.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Counter fields guarded by the handle's lock
#[derive(Debug, Default)]
struct MetricsInner {
    requests_total: u64,
    errors_total: u64,
    total_response_time_ms: f64,
    average_response_time_ms: f64,
}

/// Shared metrics handle
///
/// Cloning is cheap and all clones observe the same counters. Counters start
/// at zero, are mutated exactly once per non-exempt request and are never
/// persisted; they die with the process.
#[derive(Debug, Clone, Default)]
pub struct GatewayMetrics {
    inner: Arc<Mutex<MetricsInner>>,
}

impl GatewayMetrics {
    /// Create a zeroed metrics handle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request
    ///
    /// `server_error` marks responses with status >= 500. The error count,
    /// request count, latency accumulator and average recomputation are one
    /// atomic unit: concurrent readers see either none or all of them.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_request(&self, elapsed_ms: f64, server_error: bool) {
        let mut inner = self.inner.lock().expect("metrics lock poisoned");
        if server_error {
            inner.errors_total += 1;
        }
        inner.requests_total += 1;
        inner.total_response_time_ms += elapsed_ms;
        inner.average_response_time_ms = inner.total_response_time_ms / inner.requests_total as f64;
    }

    /// Record a failure that produced no response
    ///
    /// Counts toward `errors_total` only: with no completed response there
    /// is no latency to account for and the request is excluded from
    /// `requests_total` and the average.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().expect("metrics lock poisoned");
        inner.errors_total += 1;
    }

    /// Take a consistent snapshot of all counters
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock().expect("metrics lock poisoned");
        MetricsSnapshot {
            requests_total: inner.requests_total,
            errors_total: inner.errors_total,
            total_response_time_ms: inner.total_response_time_ms,
            average_response_time_ms: inner.average_response_time_ms,
        }
    }

    /// Reset all counters (useful for testing)
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("metrics lock poisoned");
        *inner = MetricsInner::default();
    }
}

/// Snapshot of the counters, also the wire shape of `GET /metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Requests completed through the middleware
    pub requests_total: u64,
    /// Server errors (5xx responses plus failures with no response)
    pub errors_total: u64,
    /// Cumulative wall-clock latency in milliseconds
    pub total_response_time_ms: f64,
    /// Derived mean latency: total / requests
    pub average_response_time_ms: f64,
}
