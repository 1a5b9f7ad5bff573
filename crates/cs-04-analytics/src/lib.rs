//! # cs-04-analytics
//!
//! Timestamped, namespaced event recording.
//!
//! Event keys are composed by the caller as `pack.card.item` and treated as
//! opaque here. Batches are recorded concurrently; see [`AnalyticsRecorder`]
//! for the partial-failure contract.

pub mod adapters;
pub mod ports;
pub mod recorder;

pub use adapters::{InMemoryAnalyticsSink, JsonLinesAnalyticsSink};
pub use ports::{AnalyticsSink, SystemTimeSource, TimeSource};
pub use recorder::{parse_events, AnalyticsRecorder, EventItem};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The sink refused or lost the event.
    #[error("analytics sink error: {0}")]
    Sink(String),

    #[error("analytics I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("analytics serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The submitted payload is not an event or list of events.
    #[error("invalid events: {0}")]
    InvalidEvents(String),
}
