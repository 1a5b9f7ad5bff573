//! Analytics sinks.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonLinesAnalyticsSink;
pub use memory::InMemoryAnalyticsSink;
