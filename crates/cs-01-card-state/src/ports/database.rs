use async_trait::async_trait;
use shared_types::{ApiKeyRecord, CardInstanceKey, CardState};

use crate::domain::{ApiKeyStoreError, StateStoreError};

/// Persistent state keyed by card instance.
///
/// `set` overwrites unconditionally: last completed write wins, there is no
/// merge and no compare-and-swap. Backend errors are returned as-is, the
/// store never retries.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing was ever written for `key`.
    async fn get(&self, key: &CardInstanceKey) -> Result<Option<CardState>, StateStoreError>;

    async fn set(&self, key: &CardInstanceKey, state: CardState) -> Result<(), StateStoreError>;
}

/// Lookup side of the out-of-band API key issuance.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// At most one active record per instance key.
    async fn lookup(&self, key: &CardInstanceKey) -> Result<Option<ApiKeyRecord>, ApiKeyStoreError>;
}
