//! Metrics middleware
//!
//! Explicit wrapper around the next handler, composed once at router
//! construction. Every non-exempt request is timed wall-clock and folded
//! into the shared counters after the handler returns; `/metrics` and
//! `/health` bypass the accounting entirely so dashboard polling never
//! perturbs the numbers it reads.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use futures::FutureExt;

use crate::metrics::GatewayMetrics;

/// Paths excluded from timing and counting
pub const EXEMPT_PATHS: &[&str] = &["/metrics", "/health"];

/// Time a request and update the shared counters
///
/// Responses with status >= 500 increment the error counter; every
/// completed response increments the request counter and feeds the latency
/// accumulator in one atomic update. A handler that panics before producing
/// a response is counted as an error only — no completed response exists,
/// so it is excluded from latency accounting — and the panic is re-raised
/// for the transport layer to handle.
pub async fn track_metrics(
    State(metrics): State<GatewayMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if EXEMPT_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let start = Instant::now();
    let response = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            metrics.record_failure();
            std::panic::resume_unwind(panic);
        },
    };

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics.record_request(elapsed_ms, response.status().is_server_error());
    tracing::info!("request to {path} completed in {elapsed_ms:.2}ms");

    response
}
