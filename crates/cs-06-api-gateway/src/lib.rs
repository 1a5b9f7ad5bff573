//! CS-06 API Gateway - HTTP and WebSocket surface for Card-Sync.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       API GATEWAY (cs-06)                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Cors → Tracing → Metrics → BodyLimit                            │
//! │                       │                                          │
//! │   ┌───────────┬───────┴──────┬──────────────┬────────────┐       │
//! │   │  catalog  │ state/data   │  analytics   │  webhook   │  ws   │
//! │   └─────┬─────┴──────┬───────┴──────┬───────┴─────┬──────┴───┬───┘
//! └─────────┼────────────┼──────────────┼─────────────┼──────────┼───┘
//!           ▼            ▼              ▼             ▼          ▼
//!      cs-02-catalog  cs-01-state   cs-04-analytics  cs-05   cs-03-realtime
//! ```
//!
//! # Write paths
//!
//! - `POST /api/state` and `POST /api/analytics` are gated by the API key
//!   for the supplied `cardKey` and report failures with
//!   `{"error": true, "message": ...}`.
//! - `POST /api/webhook/{pack}/{card}` is trusted and always answers
//!   `200 {}`; its failures are visible only in logs and `/metrics`.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, ErrorKind, GatewayError};
pub use middleware::GatewayMetrics;
pub use router::build_router;
pub use service::ApiGatewayService;
pub use state::{AppState, GatewayBackends};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
