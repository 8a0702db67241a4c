//! HTTP API for the gateway
//!
//! Provides the REST surface in front of the completion pipeline using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Static informational message
//! - `GET /health` - Health check (exempt from metrics)
//! - `GET /metrics` - Snapshot of the request counters (exempt from metrics)
//! - `POST /api/v1/chat/completions` - Chat completion
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

pub mod types;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ErrorResponse,
    HealthResponse, Role, RootResponse,
};

use crate::completion::CompletionService;
use crate::config::GatewayConfig;
use crate::infer::InferenceAdapter;
use crate::metrics::{GatewayMetrics, MetricsSnapshot};
use crate::middleware::track_metrics;
use crate::model::{CausalModel, EchoModel};

/// Application state shared across handlers
///
/// The metrics handle is injected here at construction and cloned into the
/// middleware layer; there is no ambient global.
#[derive(Clone)]
pub struct AppState {
    /// Completion pipeline
    completion: Arc<CompletionService>,
    /// Shared request counters
    metrics: GatewayMetrics,
}

impl AppState {
    /// Create application state around a model backend
    #[must_use]
    pub fn new(model: Arc<dyn CausalModel>, config: &GatewayConfig) -> Self {
        let adapter = InferenceAdapter::new(model, config);
        Self {
            completion: Arc::new(CompletionService::new(adapter, config)),
            metrics: GatewayMetrics::new(),
        }
    }

    /// Create state backed by the deterministic demo model
    #[must_use]
    pub fn demo() -> Self {
        Self::new(Arc::new(EchoModel::new()), &GatewayConfig::new())
    }

    /// The shared metrics handle
    #[must_use]
    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }
}

/// Create the API router
///
/// The metrics middleware wraps every route; exemption for `/health` and
/// `/metrics` is decided inside the middleware itself.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/chat/completions", post(chat_completions_handler))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_metrics,
        ))
        .with_state(state)
}

/// Informational root endpoint
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Gateway is up. Use POST /api/v1/chat/completions for inference.".to_string(),
    })
}

/// Health check handler
///
/// Independent of model and metrics state: answers while inference is in
/// flight on other requests.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Metrics handler - returns a copy of the counters, never a live reference
async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Chat completion handler
///
/// Generation is CPU-bound and runs on a blocking worker so the async
/// executor keeps serving health checks while a completion is in flight.
async fn chat_completions_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Response {
    let service = state.completion.clone();
    match tokio::task::spawn_blocking(move || service.complete(&request)).await {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(err)) => {
            tracing::error!("chat completion failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        },
        Err(err) => {
            tracing::error!("inference task aborted: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "inference task aborted".to_string(),
                }),
            )
                .into_response()
        },
    }
}
