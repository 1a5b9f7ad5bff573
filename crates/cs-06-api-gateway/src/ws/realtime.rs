//! Realtime subscription socket.
//!
//! Each connection follows one instance key; every state pushed to that key
//! is forwarded as a JSON text frame. Client frames other than close are
//! ignored.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use cs_03_realtime_sync::StateSubscription;
use futures::{SinkExt, StreamExt};
use shared_types::CardInstanceKey;
use tracing::{debug, info, warn};

use crate::middleware::GatewayMetrics;
use crate::state::AppState;

/// `GET /api/realtime/{cardKey}`
pub async fn realtime_upgrade(
    ws: WebSocketUpgrade,
    Path(card_key): Path<String>,
    State(state): State<AppState>,
) -> Response {
    // Subscribe before the upgrade completes so no push is missed in between
    let subscription = state.hub.subscribe(&CardInstanceKey::from_raw(card_key));
    let metrics = Arc::clone(&state.metrics);
    ws.on_upgrade(move |socket| forward_states(socket, subscription, metrics))
}

async fn forward_states(
    socket: WebSocket,
    mut subscription: StateSubscription,
    metrics: Arc<GatewayMetrics>,
) {
    let card_key = subscription.key().clone();
    info!(card_key = %card_key, "Realtime subscriber connected");
    metrics.record_realtime_connect();

    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            pushed = subscription.recv() => {
                let Some(state) = pushed else { break };
                let frame = match serde_json::to_string(state.as_value()) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(card_key = %card_key, error = %e, "Unserializable state skipped");
                        continue;
                    }
                };
                if let Err(e) = sender.send(Message::Text(frame)).await {
                    debug!(card_key = %card_key, error = %e, "Realtime send failed");
                    break;
                }
                metrics.record_realtime_frame();
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(card_key = %card_key, error = %e, "Realtime socket error");
                    break;
                }
            },
        }
    }

    metrics.record_realtime_disconnect();
    info!(card_key = %card_key, "Realtime subscriber disconnected");
}
