//! WebSocket support.

pub mod realtime;

pub use realtime::realtime_upgrade;
