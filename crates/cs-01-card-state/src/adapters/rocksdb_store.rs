//! # RocksDB State Store
//!
//! Production backend, enabled with the `rocksdb` feature. RocksDB calls are
//! blocking, so each one runs on the blocking pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{Options, WriteOptions, DB};
use shared_types::{CardInstanceKey, CardState};

use crate::domain::StateStoreError;
use crate::ports::StateStore;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            block_cache_size: 64 * 1024 * 1024, // 64MB
            sync_writes: true,
        }
    }
}

pub struct RocksDbStateStore {
    db: Arc<DB>,
    config: RocksDbConfig,
}

impl RocksDbStateStore {
    /// Open or create a database at `path`.
    pub fn open(path: impl AsRef<Path>, config: RocksDbConfig) -> Result<Self, StateStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, path)
            .map_err(|e| StateStoreError::Backend(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self {
            db: Arc::new(db),
            config,
        })
    }
}

#[async_trait]
impl StateStore for RocksDbStateStore {
    async fn get(&self, key: &CardInstanceKey) -> Result<Option<CardState>, StateStoreError> {
        let db = Arc::clone(&self.db);
        let raw_key = key.as_str().as_bytes().to_vec();

        let value = tokio::task::spawn_blocking(move || db.get(raw_key))
            .await
            .map_err(|e| StateStoreError::Backend(format!("RocksDB task failed: {}", e)))?
            .map_err(|e| StateStoreError::Backend(format!("RocksDB get failed: {}", e)))?;

        value
            .map(|bytes| CardState::from_json_slice(&bytes).map_err(StateStoreError::from))
            .transpose()
    }

    async fn set(&self, key: &CardInstanceKey, state: CardState) -> Result<(), StateStoreError> {
        let db = Arc::clone(&self.db);
        let raw_key = key.as_str().as_bytes().to_vec();
        let bytes = state.to_json_vec()?;
        let sync = self.config.sync_writes;

        tokio::task::spawn_blocking(move || {
            let mut write_opts = WriteOptions::default();
            write_opts.set_sync(sync);
            db.put_opt(raw_key, bytes, &write_opts)
        })
        .await
        .map_err(|e| StateStoreError::Backend(format!("RocksDB task failed: {}", e)))?
        .map_err(|e| StateStoreError::Backend(format!("RocksDB put failed: {}", e)))
    }
}
