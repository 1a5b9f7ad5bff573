//! Route table and middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::domain::GatewayConfig;
use crate::middleware::{create_cors_layer, MetricsLayer, TracingLayer};
use crate::routes::{self, catalog, state as state_routes, webhook};
use crate::state::AppState;
use crate::ws;

/// Build the HTTP router.
///
/// | Route | Method |
/// |---|---|
/// | `/api/count` | GET |
/// | `/api/cards?q=&page=` | GET |
/// | `/api/card?pack=&card=` | GET |
/// | `/api/data/{pack}/{card}?params` | GET |
/// | `/api/state` | POST |
/// | `/api/analytics` | POST |
/// | `/api/webhook/{pack}/{card}` | POST |
/// | `/api/realtime/{cardKey}` | GET (WebSocket) |
/// | `/health`, `/metrics` | GET |
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let metrics = state.metrics.clone();
    let limit = config.limits.max_request_size;

    // Client handlers turn an over-limit body into a 413 error envelope
    let client: Router<AppState> = Router::new()
        .route("/api/count", get(catalog::count))
        .route("/api/cards", get(catalog::cards))
        .route("/api/card", get(catalog::card))
        .route("/api/data/:pack/:card", get(state_routes::get_data))
        .route("/api/state", post(state_routes::post_state))
        .route("/api/analytics", post(state_routes::post_analytics))
        .route("/api/realtime/:card_key", get(ws::realtime_upgrade))
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .layer(DefaultBodyLimit::max(limit));

    // Webhooks enforce the limit in the body extractor, which the handler
    // absorbs, so senders still get `200 {}`
    let webhooks: Router<AppState> = Router::new()
        .route("/api/webhook/:pack/:card", post(webhook::post_webhook))
        .layer(DefaultBodyLimit::max(limit));

    Router::new()
        .merge(client)
        .merge(webhooks)
        .layer(MetricsLayer::new(metrics))
        .layer(TracingLayer::new())
        .layer(create_cors_layer(&config.cors))
        .with_state(state)
}
