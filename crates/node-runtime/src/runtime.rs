//! The node runtime: owns the container and the gateway service.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use cs_06_api_gateway::ApiGatewayService;
use tracing::{info, warn};

use crate::container::{NodeConfig, NodeContainer};

/// Time in-flight requests and open realtime sockets get to finish.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub struct NodeRuntime {
    container: NodeContainer,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Validate `config`, open every backend and build the gateway.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let container = NodeContainer::build(config)
            .await
            .context("Failed to open backends")?;
        let gateway = ApiGatewayService::new(container.config.gateway.clone(), container.backends())
            .context("Failed to build API gateway")?;

        Ok(Self { container, gateway })
    }

    /// Start serving. Returns the bound address, `None` when HTTP is disabled.
    pub async fn start(&mut self) -> Result<Option<SocketAddr>> {
        info!("===========================================");
        info!("  Card-Sync Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let addr = self
            .gateway
            .start()
            .await
            .context("Failed to start API gateway")?;

        let config = &self.container.config;
        info!(
            storage = ?config.storage.backend,
            data_dir = %config.storage.data_dir.display(),
            analytics = ?config.analytics.backend,
            "Node is ready"
        );
        Ok(addr)
    }

    /// Stop accepting requests and wait, bounded by [`SHUTDOWN_GRACE`].
    pub async fn shutdown(&mut self) {
        info!("Initiating graceful shutdown...");
        if tokio::time::timeout(SHUTDOWN_GRACE, self.gateway.shutdown())
            .await
            .is_err()
        {
            warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Shutdown grace period elapsed");
        }
        info!("Shutdown complete");
    }

    pub fn container(&self) -> &NodeContainer {
        &self.container
    }

    pub fn gateway(&self) -> &ApiGatewayService {
        &self.gateway
    }
}
