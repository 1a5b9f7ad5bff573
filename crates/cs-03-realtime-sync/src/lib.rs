//! # cs-03-realtime-sync
//!
//! Best-effort propagation of card state to live subscribers.
//!
//! Delivery is not guaranteed: a push with no subscribers succeeds with zero
//! receivers, and lagging subscribers skip frames. Callers treat a push
//! failure as loggable, never as a reason to fail or roll back a write.

pub mod hub;

pub use hub::{BroadcastHub, StateSubscription, DEFAULT_CHANNEL_CAPACITY};

use async_trait::async_trait;
use shared_types::{CardInstanceKey, CardState};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RealtimeError {
    #[error("realtime channel unavailable: {0}")]
    Unavailable(String),
}

/// Push channel addressed by instance key.
#[async_trait]
pub trait RealtimeSync: Send + Sync {
    /// Returns the number of subscribers the state was handed to.
    async fn push(&self, key: &CardInstanceKey, state: &CardState) -> Result<usize, RealtimeError>;
}
