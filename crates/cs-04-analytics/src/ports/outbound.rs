//! Outbound ports for analytics ingestion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::AnalyticsEvent;

use crate::AnalyticsError;

/// Append-only event destination.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System time implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
