//! Broadcast hub: one `tokio::sync::broadcast` channel per instance key.
//!
//! Channels are created on first subscribe and removed when the last
//! subscription for the key is dropped. Slow subscribers lose the oldest
//! frames instead of stalling the pusher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use dashmap::DashMap;
use shared_types::{CardInstanceKey, CardState};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{RealtimeError, RealtimeSync};

/// Default per-key channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

type Channels = DashMap<CardInstanceKey, broadcast::Sender<CardState>>;

/// Realtime hub
pub struct BroadcastHub {
    /// Channels by instance key
    channels: Arc<Channels>,
    /// Frames buffered per key before lagging subscribers drop frames
    capacity: usize,
    /// Pushes that reached at least one subscriber
    delivered: AtomicU64,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            capacity: capacity.max(1),
            delivered: AtomicU64::new(0),
        }
    }

    /// Subscribe to state pushes for `key`.
    pub fn subscribe(&self, key: &CardInstanceKey) -> StateSubscription {
        let receiver = self
            .channels
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();

        debug!(card_key = %key, "Realtime subscriber added");
        StateSubscription {
            key: key.clone(),
            receiver,
            channels: Arc::downgrade(&self.channels),
        }
    }

    /// Live subscribers for `key`.
    pub fn subscriber_count(&self, key: &CardInstanceKey) -> usize {
        self.channels
            .get(key)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Keys with an open channel.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[async_trait]
impl RealtimeSync for BroadcastHub {
    async fn push(&self, key: &CardInstanceKey, state: &CardState) -> Result<usize, RealtimeError> {
        let sent = match self.channels.get(key) {
            Some(tx) => tx.send(state.clone()).unwrap_or(0),
            None => return Ok(0),
        };

        if sent == 0 {
            // Only reachable if a subscription was leaked without running Drop
            self.channels.remove_if(key, |_, tx| tx.receiver_count() == 0);
        } else {
            self.delivered.fetch_add(1, Ordering::Relaxed);
        }

        debug!(card_key = %key, subscribers = sent, "Realtime push");
        Ok(sent)
    }
}

/// Receiving end for one instance key. Dropping the last one for a key
/// closes the key's channel.
pub struct StateSubscription {
    key: CardInstanceKey,
    receiver: broadcast::Receiver<CardState>,
    channels: Weak<Channels>,
}

impl StateSubscription {
    pub fn key(&self) -> &CardInstanceKey {
        &self.key
    }

    /// Next pushed state. Frames missed while lagging are skipped;
    /// `None` once the hub side is gone.
    pub async fn recv(&mut self) -> Option<CardState> {
        loop {
            match self.receiver.recv().await {
                Ok(state) => return Some(state),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(card_key = %self.key, skipped, "Realtime subscriber lagging, frames dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        let Some(channels) = self.channels.upgrade() else {
            return;
        };
        // Our receiver is still counted here. Subscribe takes the same shard
        // lock, so a concurrent subscriber either keeps the channel alive or
        // recreates it.
        if channels
            .remove_if(&self.key, |_, tx| tx.receiver_count() <= 1)
            .is_some()
        {
            debug!(card_key = %self.key, "Realtime channel closed");
        }
    }
}
