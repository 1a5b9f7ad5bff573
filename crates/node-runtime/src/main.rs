//! # Card-Sync Node
//!
//! Serves the card state API, webhook ingestion and realtime push for the
//! registered card packs. See the `node_runtime` library docs for the
//! startup sequence and `container::config` for the configuration sources.

use anyhow::{Context, Result};
use cs_telemetry::{init_logging, TelemetryConfig};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("Failed to initialise logging")?;

    let config = NodeConfig::load().context("Failed to load configuration")?;

    let mut runtime = NodeRuntime::new(config).await?;
    if let Some(addr) = runtime.start().await? {
        info!(%addr, "Listening");
    }

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    runtime.shutdown().await;
    Ok(())
}
