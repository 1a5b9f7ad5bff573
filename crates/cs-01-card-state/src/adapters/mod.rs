//! Storage adapters.

pub mod file_store;
pub mod memory_db;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;

pub use file_store::FileStateStore;
pub use memory_db::{InMemoryApiKeyStore, InMemoryStateStore};
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbStateStore};
