//! # Node Runtime Library
//!
//! Configuration loading, backend wiring and the bundled card pack of the
//! Card-Sync node. The entry point is the `cardsync-node` binary; the library
//! is exposed for integration tests.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`cs-telemetry`)
//! 2. Load configuration (defaults, `CS_CONFIG`, environment)
//! 3. Validate; a bad config aborts startup
//! 4. Open backends and register the demo pack
//! 5. Start the API gateway
//! 6. Serve until Ctrl+C, then shut down gracefully

pub mod cards;
pub mod container;
pub mod runtime;

pub use container::{ConfigError, ContainerError, NodeConfig, NodeContainer};
pub use runtime::NodeRuntime;
