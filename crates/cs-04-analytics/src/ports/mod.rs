pub mod outbound;

pub use outbound::{AnalyticsSink, SystemTimeSource, TimeSource};
