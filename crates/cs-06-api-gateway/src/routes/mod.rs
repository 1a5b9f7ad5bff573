//! HTTP handlers.

pub mod body;
pub mod catalog;
pub mod state;
pub mod webhook;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.metrics.to_json(state.hub.delivered_count()))
}
