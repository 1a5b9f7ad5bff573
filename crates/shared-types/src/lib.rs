//! # Shared Types Crate
//!
//! Domain entities used by every Card-Sync crate.
//!
//! ## Design Principles
//!
//! - **Opaque State**: `CardState` wraps a JSON value that no crate inspects.
//! - **Stable Addressing**: `CardInstanceKey` is the only handle used for
//!   state, API keys and realtime subscribers.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
