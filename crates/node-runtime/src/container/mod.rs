//! # Node Container
//!
//! Configuration and the backends it selects, wired once at startup and
//! shared with the gateway afterwards.

pub mod backends;
pub mod config;

pub use backends::{ContainerError, NodeContainer};
pub use config::{ConfigError, NodeConfig};
