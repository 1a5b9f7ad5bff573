//! # Integration Flows
//!
//! Every flow runs the real crates against in-memory backends, driving the
//! HTTP surface in-process with `tower::ServiceExt::oneshot`.

pub mod harness;

mod analytics_flow;
mod realtime_flow;
mod state_flow;
mod webhook_flow;
