use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{ApiKeyRecord, CardInstanceKey, CardState};

use crate::domain::{ApiKeyStoreError, StateStoreError};
use crate::ports::{ApiKeyStore, StateStore};

/// In-memory implementation of StateStore for development and tests
pub struct InMemoryStateStore {
    states: RwLock<HashMap<CardInstanceKey, CardState>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Number of instances holding state.
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &CardInstanceKey) -> Result<Option<CardState>, StateStoreError> {
        Ok(self.states.read().get(key).cloned())
    }

    async fn set(&self, key: &CardInstanceKey, state: CardState) -> Result<(), StateStoreError> {
        self.states.write().insert(key.clone(), state);
        Ok(())
    }
}

/// In-memory API key records.
///
/// `issue` is the hook for the external issuance collaborator; the gate only
/// ever reads.
pub struct InMemoryApiKeyStore {
    records: RwLock<HashMap<CardInstanceKey, ApiKeyRecord>>,
}

impl InMemoryApiKeyStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Issue (or replace) the secret for an instance. Returns the previous
    /// record if one was active.
    pub fn issue(&self, card_key: CardInstanceKey, secret: impl Into<String>) -> Option<ApiKeyRecord> {
        let record = ApiKeyRecord {
            card_key: card_key.clone(),
            secret: secret.into(),
        };
        self.records.write().insert(card_key, record)
    }
}

impl Default for InMemoryApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeyStore {
    async fn lookup(&self, key: &CardInstanceKey) -> Result<Option<ApiKeyRecord>, ApiKeyStoreError> {
        Ok(self.records.read().get(key).cloned())
    }
}
