//! API key gate service.

use std::sync::Arc;

use shared_types::CardInstanceKey;
use tracing::{debug, warn};

use crate::domain::{evaluate, KeyVerdict};
use crate::ports::ApiKeyStore;

/// Validates caller-supplied secrets for direct client writes.
///
/// Webhook-originated writes do not pass through here; they are trusted
/// server-to-server calls authorized at the transport layer.
#[derive(Clone)]
pub struct ApiKeyGate {
    store: Arc<dyn ApiKeyStore>,
}

impl ApiKeyGate {
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }

    /// Check `supplied` against the record for `card_key`.
    ///
    /// A lookup failure is treated as Invalid with the backend detail
    /// appended to the reason.
    pub async fn validate(&self, card_key: &CardInstanceKey, supplied: &str) -> KeyVerdict {
        let record = match self.store.lookup(card_key).await {
            Ok(record) => record,
            Err(e) => {
                warn!(card_key = %card_key, error = %e, "API key lookup failed");
                return KeyVerdict::invalid(Some(&e.to_string()));
            }
        };

        let verdict = evaluate(record.as_ref(), supplied);
        if !verdict.is_valid() {
            debug!(card_key = %card_key, "API key rejected");
        }
        verdict
    }
}
