//! Analytics recorder.
//!
//! Batches are submitted as independent spawned tasks. The batch reports
//! the first failure to complete, but every sibling submission runs to
//! completion, even if the caller stops waiting: nothing is cancelled and
//! nothing already recorded is rolled back, so a failed batch may be
//! partially recorded.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Deserialize;
use shared_types::{compose_event_key, AnalyticsEvent};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{AnalyticsSink, SystemTimeSource, TimeSource};
use crate::AnalyticsError;

/// One item reported by a card, before its key is namespaced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventItem {
    pub key: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Accept either a single event object or an array of them.
pub fn parse_events(value: serde_json::Value) -> Result<Vec<EventItem>, AnalyticsError> {
    let items = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<EventItem>, _>>(),
        single @ serde_json::Value::Object(_) => serde_json::from_value(single).map(|e| vec![e]),
        other => {
            return Err(AnalyticsError::InvalidEvents(format!(
                "expected an event object or array, got {}",
                json_kind(&other)
            )))
        }
    };
    items.map_err(|e| AnalyticsError::InvalidEvents(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Stamps and forwards events to a sink. Treats event keys as opaque.
#[derive(Clone)]
pub struct AnalyticsRecorder {
    sink: Arc<dyn AnalyticsSink>,
    clock: Arc<dyn TimeSource>,
}

impl AnalyticsRecorder {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self::with_clock(sink, Arc::new(SystemTimeSource))
    }

    pub fn with_clock(sink: Arc<dyn AnalyticsSink>, clock: Arc<dyn TimeSource>) -> Self {
        Self { sink, clock }
    }

    /// Record a single event.
    pub async fn add_event(
        &self,
        event_key: impl Into<String>,
        data: serde_json::Value,
    ) -> Result<(), AnalyticsError> {
        let event = AnalyticsEvent {
            event_key: event_key.into(),
            data,
            timestamp: self.clock.now(),
        };
        self.sink.record(event).await
    }

    /// Record a batch, one spawned task per event.
    ///
    /// Returns the number of events recorded, or the first failure observed.
    /// On failure, or if this future is dropped, the remaining submissions
    /// still complete. Must be called within a Tokio runtime.
    pub async fn add_events(&self, events: Vec<(String, serde_json::Value)>) -> Result<usize, AnalyticsError> {
        // Dropping a JoinHandle detaches its task
        let mut in_flight: FuturesUnordered<JoinHandle<_>> = events
            .into_iter()
            .map(|(key, data)| {
                let recorder = self.clone();
                tokio::spawn(async move {
                    let result = recorder.add_event(key.clone(), data).await;
                    (key, result)
                })
            })
            .collect();

        let mut recorded = 0usize;
        let mut first_error = None;

        while let Some(joined) = in_flight.next().await {
            match joined {
                Ok((_, Ok(()))) => recorded += 1,
                Ok((key, Err(e))) => {
                    warn!(event_key = %key, error = %e, "Analytics event failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    warn!(error = %e, "Analytics event task aborted");
                    first_error.get_or_insert(AnalyticsError::Sink(format!("event task aborted: {}", e)));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                debug!(recorded, "Analytics batch recorded");
                Ok(recorded)
            }
        }
    }

    /// Namespace `items` as `pack.card.item-key` and record them as a batch.
    pub async fn record_card_events(
        &self,
        pack: &str,
        card: &str,
        items: Vec<EventItem>,
    ) -> Result<usize, AnalyticsError> {
        let events = items
            .into_iter()
            .map(|item| (compose_event_key(pack, card, &item.key), item.data))
            .collect();
        self.add_events(events).await
    }
}
