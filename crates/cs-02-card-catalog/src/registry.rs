//! # Card Registry
//!
//! Maps `(pack, card)` to the module implementing it. Modules are registered
//! once at startup; after that the registry is shared read-only and every
//! lookup is a plain map access.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                CardRegistry                  │
//! │                                              │
//! │  demo/counter ──→ data | webhook | realtime  │
//! │  demo/notes   ──→ data                       │
//! │  ...                                         │
//! └──────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{CardId, CardIdError};
use thiserror::Error;
use tracing::info;

use crate::domain::{CardCatalog, CardModule};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    InvalidId(#[from] CardIdError),

    #[error("Card already registered: {0}")]
    Duplicate(CardId),
}

/// Registered card modules.
#[derive(Default)]
pub struct CardRegistry {
    modules: HashMap<CardId, Arc<dyn CardModule>>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its descriptor's (pack, name).
    pub fn register(&mut self, module: Arc<dyn CardModule>) -> Result<CardId, RegistryError> {
        let descriptor = module.descriptor();
        let id = CardId::new(descriptor.pack, descriptor.name)?;
        if self.modules.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }

        let caps = module.capabilities();
        info!(
            card = %id,
            data = caps.data,
            webhook = caps.webhook,
            realtime = caps.realtime,
            "Registered card module"
        );
        self.modules.insert(id.clone(), module);
        Ok(id)
    }

    /// Look up the module for `(pack, card)`. Names are case-sensitive.
    pub fn resolve(&self, pack: &str, card: &str) -> Option<Arc<dyn CardModule>> {
        let id = CardId {
            pack: pack.to_string(),
            card: card.to_string(),
        };
        self.modules.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Snapshot of every registered descriptor.
    pub fn catalog(&self) -> CardCatalog {
        CardCatalog::new(self.modules.values().map(|m| m.descriptor()).collect())
    }
}
