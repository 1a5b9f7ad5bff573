//! # Card-Sync Telemetry
//!
//! Structured logging for Card-Sync services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cs_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CS_SERVICE_NAME` | `card-sync` | Service name in logs |
//! | `CS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `CS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CS_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

