//! # HTTP Server
//!
//! Axum server carrying the handler endpoint, Prometheus metrics and probes.
//!
//! - `POST /v1/handler` - run one invocation, answers a `ProgressEvent`
//! - `GET /metrics` - Prometheus text format
//! - `GET /healthz` - liveness
//! - `GET /readyz` - readiness, true once the listener is bound

use crate::controller::handler::LifecycleHandler;
use crate::model::{HandlerRequest, ProgressEvent};
use crate::observability::metrics;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared server state
pub struct ServerState {
    pub is_ready: Arc<AtomicBool>,
    pub handler: Arc<LifecycleHandler>,
}

impl ServerState {
    pub fn new(handler: Arc<LifecycleHandler>) -> Self {
        Self {
            is_ready: Arc::new(AtomicBool::new(false)),
            handler,
        }
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("is_ready", &self.is_ready.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Build the router over the given state
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/v1/handler", post(invoke_handler))
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `port` and serve until the process is interrupted
///
/// Marks the server ready once the listener is bound.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn start_server(port: u16, state: Arc<ServerState>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;

    info!("HTTP server listening on {}", addr);
    state.is_ready.store(true, Ordering::Relaxed);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received, stopping HTTP server");
        })
        .await
        .context("HTTP server failed")
}

async fn invoke_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<HandlerRequest>,
) -> Json<ProgressEvent> {
    Json(state.handler.handle(request).await)
}

async fn metrics_handler() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if state.is_ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}
