//! Inbound webhooks. Always acknowledged with `200 {}`.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use axum::Json;
use cs_05_webhook_dispatch::{DispatchOutcome, PayloadEncoding};
use tracing::{debug, warn};

use crate::state::AppState;

/// `POST /api/webhook/{pack}/{card}`
///
/// Internal outcomes are counted and logged, never returned. An unreadable
/// body (e.g. over the size limit) is dispatched as an empty payload; an
/// undecodable path is not dispatched at all.
pub async fn post_webhook(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Json<serde_json::Value> {
    let (pack, card) = match path {
        Ok(Path(segments)) => segments,
        Err(e) => {
            warn!(error = %e, "Undecodable webhook path");
            state.metrics.record_webhook(false, false);
            return Json(DispatchOutcome::UnknownCard.acknowledgement());
        }
    };
    let body = body.unwrap_or_else(|e| {
        warn!(pack = %pack, card = %card, error = %e, "Unreadable webhook body");
        Bytes::new()
    });
    let encoding =
        PayloadEncoding::from_content_type(headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()));

    let outcome = state.dispatcher.dispatch(&pack, &card, &body, encoding).await;

    let failed = matches!(
        outcome,
        DispatchOutcome::HandlerFailed | DispatchOutcome::StateUpdated { persisted: false, .. }
    );
    state
        .metrics
        .record_webhook(matches!(outcome, DispatchOutcome::StateUpdated { .. }), failed);
    debug!(pack = %pack, card = %card, outcome = outcome.label(), "Webhook acknowledged");

    Json(outcome.acknowledgement())
}
