//! # cs-01-card-state
//!
//! Card state subsystem for Card-Sync.
//!
//! ## Role in System
//!
//! - **Key Derivation**: `(pack, card, params)` → stable `CardInstanceKey`
//! - **State Storage**: opaque state by instance key, last write wins
//! - **API Key Gate**: fail-closed validation of client-supplied secrets
//!
//! ## Write Paths
//!
//! ```text
//! client ──apiKey──→ [ApiKeyGate] ──Valid──→ [StateStore.set]
//! webhook ─────────────────────────────────→ [StateStore.set]   (trusted)
//! ```
//!
//! ## Backends
//!
//! - `InMemoryStateStore` - development and tests
//! - `FileStateStore` - one JSON document per instance
//! - `RocksDbStateStore` - behind the `rocksdb` feature

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::ApiKeyGate;
