//! # Backend Container
//!
//! Opens the configured backends and holds them for the lifetime of the
//! node. Everything is behind `Arc` and shared read-only after `build`.
//!
//! ```text
//! NodeConfig ──→ storage   (memory | file | rocksdb)
//!            ──→ analytics (memory | jsonl)
//!            ──→ api keys  (seeded from config)
//!            ──→ registry  (demo pack)
//!            ──→ realtime  (broadcast hub)
//! ```

use std::sync::Arc;

use cs_01_card_state::{FileStateStore, InMemoryApiKeyStore, InMemoryStateStore, StateStore, StateStoreError};
use cs_02_card_catalog::{CardRegistry, RegistryError};
use cs_03_realtime_sync::BroadcastHub;
use cs_04_analytics::{AnalyticsError, AnalyticsSink, InMemoryAnalyticsSink, JsonLinesAnalyticsSink};
use cs_06_api_gateway::GatewayBackends;
use shared_types::CardInstanceKey;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::cards;
use crate::container::config::{AnalyticsBackend, ApiKeySeed, NodeConfig, StorageBackend};

/// Subdirectory of `data_dir` holding state documents.
pub const STATE_DIR: &str = "state";

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("state store: {0}")]
    Storage(#[from] StateStoreError),

    #[error("analytics sink: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("card registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Central container holding every backend the gateway is wired to.
pub struct NodeContainer {
    pub config: NodeConfig,
    pub registry: Arc<CardRegistry>,
    pub store: Arc<dyn StateStore>,
    pub api_keys: Arc<InMemoryApiKeyStore>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub hub: Arc<BroadcastHub>,
}

impl NodeContainer {
    /// Open every backend. `config` must already be validated.
    #[instrument(skip_all, fields(storage = ?config.storage.backend, analytics = ?config.analytics.backend))]
    pub async fn build(config: NodeConfig) -> Result<Self, ContainerError> {
        let store = open_store(&config).await?;
        let analytics = open_analytics(&config).await?;

        let api_keys = Arc::new(InMemoryApiKeyStore::new());
        seed_api_keys(&api_keys, &config.api_keys);

        let mut registry = CardRegistry::new();
        cards::register_demo_pack(&mut registry)?;
        info!(cards = registry.len(), "Card registry loaded");

        let hub = Arc::new(BroadcastHub::new(config.gateway.realtime.channel_capacity));

        Ok(Self {
            config,
            registry: Arc::new(registry),
            store,
            api_keys,
            analytics,
            hub,
        })
    }

    /// Handles passed to the API gateway.
    pub fn backends(&self) -> GatewayBackends {
        GatewayBackends {
            registry: Arc::clone(&self.registry),
            store: Arc::clone(&self.store),
            api_keys: self.api_keys.clone(),
            analytics: Arc::clone(&self.analytics),
            hub: Arc::clone(&self.hub),
        }
    }
}

async fn open_store(config: &NodeConfig) -> Result<Arc<dyn StateStore>, ContainerError> {
    let dir = config.storage.data_dir.join(STATE_DIR);
    let store: Arc<dyn StateStore> = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory state store; state is lost on restart");
            Arc::new(InMemoryStateStore::new())
        }
        StorageBackend::File => {
            info!(dir = %dir.display(), "Opening file state store");
            Arc::new(FileStateStore::open(&dir).await?)
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => {
            use cs_01_card_state::{RocksDbConfig, RocksDbStateStore};
            info!(dir = %dir.display(), "Opening RocksDB state store");
            Arc::new(RocksDbStateStore::open(&dir, RocksDbConfig::default())?)
        }
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => {
            return Err(ContainerError::Storage(StateStoreError::Backend(
                "built without the rocksdb feature".into(),
            )))
        }
    };
    Ok(store)
}

async fn open_analytics(config: &NodeConfig) -> Result<Arc<dyn AnalyticsSink>, ContainerError> {
    let sink: Arc<dyn AnalyticsSink> = match config.analytics.backend {
        AnalyticsBackend::Memory => Arc::new(InMemoryAnalyticsSink::new()),
        AnalyticsBackend::JsonLines => {
            info!(path = %config.analytics.path.display(), "Opening analytics event file");
            Arc::new(JsonLinesAnalyticsSink::open(&config.analytics.path).await?)
        }
    };
    Ok(sink)
}

fn seed_api_keys(store: &InMemoryApiKeyStore, seeds: &[ApiKeySeed]) {
    for seed in seeds {
        let key = CardInstanceKey::from_raw(seed.card_key.as_str());
        if store.issue(key, seed.secret.as_str()).is_some() {
            warn!(card_key = %seed.card_key, "Duplicate API key seed; last one wins");
        }
    }
    info!(count = seeds.len(), "API keys issued");
}
