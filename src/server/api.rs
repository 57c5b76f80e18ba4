//! Axum handlers for `/api/*` routes.
//!
//! Each handler receives [`AppState`] via [`axum::extract::State`] and
//! returns an axum [`Response`]. The analyze handler owns the only
//! caller-level validation the engine relies on: a present, non-empty
//! primary feeling.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::engine::submission::{AnalyzeRequest, Submission};

use super::AppState;

/// POST /api/analyze
pub(super) async fn analyze(State(state): State<AppState>, Json(req): Json<AnalyzeRequest>) -> Response {
    if req.primary_feeling.as_deref().is_none_or(str::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "primaryFeeling is required" })),
        )
            .into_response();
    }

    let submission = Submission::normalize(req);
    debug!(primary = %submission.primary_feeling, "analyzing submission");

    let guidance = state.engine.analyze(&submission).await;
    (StatusCode::OK, Json(guidance)).into_response()
}

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    let body = json!({
        "service": &*state.service_name,
        "status": "ok",
        "externalClassifier": if state.engine.provider_enabled() { "enabled" } else { "disabled" },
    });
    (StatusCode::OK, Json(body)).into_response()
}
