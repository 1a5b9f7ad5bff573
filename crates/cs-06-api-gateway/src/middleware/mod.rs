//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Cors → Tracing → Metrics → BodyLimit → Handler

pub mod cors;
pub mod metrics;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsLayer};
pub use self::tracing::TracingLayer;
