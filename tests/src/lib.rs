//! # Card-Sync Test Suite
//!
//! Cross-crate flows that no single crate can test on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs          # In-memory backends + fixture card pack
//!     ├── state_flow.rs       # Key derivation → key gate → state store
//!     ├── webhook_flow.rs     # Silent-success webhook path + realtime push
//!     ├── analytics_flow.rs   # Batch ingestion, partial failure
//!     └── realtime_flow.rs    # Fan-out per instance key
//! tests/benches/
//! └── card_sync_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cs-tests
//! cargo test -p cs-tests integration::webhook_flow
//! cargo bench -p cs-tests
//! ```

pub mod integration;
