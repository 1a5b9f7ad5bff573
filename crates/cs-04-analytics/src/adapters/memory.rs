use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::AnalyticsEvent;

use crate::ports::AnalyticsSink;
use crate::AnalyticsError;

/// In-memory append-only event log.
#[derive(Default)]
pub struct InMemoryAnalyticsSink {
    events: RwLock<Vec<AnalyticsEvent>>,
}

impl InMemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event, in recording order.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.read().clone()
    }

    /// Events whose key starts with `prefix`, e.g. `demo.counter.`.
    pub fn events_with_prefix(&self, prefix: &str) -> Vec<AnalyticsEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_key.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl AnalyticsSink for InMemoryAnalyticsSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events.write().push(event);
        Ok(())
    }
}
