//! # cs-02-card-catalog
//!
//! Card catalog subsystem for Card-Sync.
//!
//! ## Role in System
//!
//! - **Registry**: explicit `(pack, card)` → `CardModule` map, filled at load time
//! - **Capabilities**: data generation, webhook, realtime eligibility
//! - **Catalog**: filterable descriptor list with fixed-size pages of 20

pub mod domain;
pub mod registry;

pub use domain::*;
pub use registry::{CardRegistry, RegistryError};
