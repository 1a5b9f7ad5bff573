//! Webhook dispatcher.
//!
//! ## Silent-success policy
//!
//! Every dispatch ends with the same acknowledgement to the sender, an empty
//! JSON object, whatever happened internally. Unknown cards, cards without a
//! webhook capability, failing handlers, failed persistence and failed
//! pushes are all logged and otherwise invisible to the caller.
//!
//! Webhook senders are third parties whose retry behavior is out of our
//! hands. Surfacing internal failures would either leak whether a pack
//! exists or invite unbounded retries. The cost is that failures are only
//! visible in logs. Do not turn [`DispatchOutcome`] into an HTTP status.

use std::sync::Arc;

use cs_01_card_state::{KeyDeriver, StateStore};
use cs_02_card_catalog::{CardRegistry, WebhookReply};
use cs_03_realtime_sync::RealtimeSync;
use shared_types::{CardInstanceKey, CardState};
use tracing::{debug, error, info, warn};

use crate::payload::{parse_payload, PayloadEncoding};

/// What a dispatch did internally. Logged and counted, never returned to
/// the webhook sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No module is registered for (pack, card).
    UnknownCard,
    /// The module exists but declares no webhook capability.
    NoWebhookCapability,
    /// The module's webhook handler returned an error.
    HandlerFailed,
    /// The handler succeeded without producing state.
    NoStateChange,
    /// The handler produced state for `key`.
    StateUpdated {
        key: CardInstanceKey,
        /// The store accepted the write.
        persisted: bool,
        /// Subscribers reached, `None` when the card is not realtime-eligible
        /// or the push failed.
        pushed: Option<usize>,
    },
}

impl DispatchOutcome {
    /// Short label for logs and counters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnknownCard => "unknown_card",
            Self::NoWebhookCapability => "no_webhook",
            Self::HandlerFailed => "handler_failed",
            Self::NoStateChange => "no_state",
            Self::StateUpdated { .. } => "state_updated",
        }
    }

    /// Body acknowledged to the webhook sender. Identical for every outcome.
    pub fn acknowledgement(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }
}

/// Routes inbound webhooks to card modules and applies the resulting state.
///
/// Writes arriving here are trusted server-to-server calls; they bypass the
/// API key gate.
#[derive(Clone)]
pub struct WebhookDispatcher {
    registry: Arc<CardRegistry>,
    store: Arc<dyn StateStore>,
    realtime: Arc<dyn RealtimeSync>,
}

impl WebhookDispatcher {
    pub fn new(
        registry: Arc<CardRegistry>,
        store: Arc<dyn StateStore>,
        realtime: Arc<dyn RealtimeSync>,
    ) -> Self {
        Self {
            registry,
            store,
            realtime,
        }
    }

    /// Dispatch one inbound webhook. Never fails; see the module docs.
    pub async fn dispatch(
        &self,
        pack: &str,
        card: &str,
        body: &[u8],
        encoding: PayloadEncoding,
    ) -> DispatchOutcome {
        let Some(module) = self.registry.resolve(pack, card) else {
            debug!(pack, card, "Webhook for unknown card ignored");
            return DispatchOutcome::UnknownCard;
        };

        let payload = parse_payload(body, encoding).unwrap_or_else(|e| {
            warn!(pack, card, error = %e, "Malformed webhook payload, continuing with {{}}");
            serde_json::Value::Object(serde_json::Map::new())
        });

        let capabilities = module.capabilities();
        if !capabilities.webhook {
            debug!(pack, card, "Card has no webhook capability");
            return DispatchOutcome::NoWebhookCapability;
        }

        let reply = match module.webhook(payload).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(pack, card, error = %e, "Card webhook handler failed");
                return DispatchOutcome::HandlerFailed;
            }
        };

        let WebhookReply { url_params, state } = reply;
        let Some(state) = state else {
            debug!(pack, card, "Webhook produced no state");
            return DispatchOutcome::NoStateChange;
        };

        let key = KeyDeriver::derive(pack, card, &url_params);
        let (persisted, pushed) = tokio::join!(
            self.persist(pack, card, &key, state.clone()),
            self.push(pack, card, &key, &state, capabilities.realtime),
        );

        info!(pack, card, card_key = %key, persisted, pushed = ?pushed, "Webhook state applied");
        DispatchOutcome::StateUpdated {
            key,
            persisted,
            pushed,
        }
    }

    async fn persist(&self, pack: &str, card: &str, key: &CardInstanceKey, state: CardState) -> bool {
        match self.store.set(key, state).await {
            Ok(()) => true,
            Err(e) => {
                error!(pack, card, card_key = %key, error = %e, "Webhook state persist failed");
                false
            }
        }
    }

    async fn push(
        &self,
        pack: &str,
        card: &str,
        key: &CardInstanceKey,
        state: &CardState,
        realtime: bool,
    ) -> Option<usize> {
        if !realtime {
            return None;
        }
        match self.realtime.push(key, state).await {
            Ok(sent) => Some(sent),
            Err(e) => {
                warn!(pack, card, card_key = %key, error = %e, "Webhook realtime push failed");
                None
            }
        }
    }
}
