//! HTTP transport — axum router and server loop.
//!
//! The transport is a thin shell around the engine: one analyze endpoint,
//! one health probe. `run()` drives the axum event loop; the caller's
//! [`CancellationToken`] is wired to axum's graceful shutdown.

pub mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::engine::Engine;
use crate::error::AppError;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Service name reported by the health probe.
    pub service_name: Arc<str>,
    /// The classification engine, shared across all requests.
    pub engine: Arc<Engine>,
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(api::analyze))
        .route("/api/health", get(api::health))
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn run(bind_addr: &str, state: AppState, shutdown: CancellationToken) -> Result<(), AppError> {
    let router = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("server shut down");
    Ok(())
}
