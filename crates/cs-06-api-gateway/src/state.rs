//! Shared handler state.

use std::sync::Arc;

use cs_01_card_state::{ApiKeyGate, ApiKeyStore, StateStore};
use cs_02_card_catalog::{CardCatalog, CardRegistry};
use cs_03_realtime_sync::BroadcastHub;
use cs_04_analytics::{AnalyticsRecorder, AnalyticsSink};
use cs_05_webhook_dispatch::WebhookDispatcher;

use crate::middleware::GatewayMetrics;

/// Backends the gateway is wired to. Chosen by the runtime.
#[derive(Clone)]
pub struct GatewayBackends {
    pub registry: Arc<CardRegistry>,
    pub store: Arc<dyn StateStore>,
    pub api_keys: Arc<dyn ApiKeyStore>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub hub: Arc<BroadcastHub>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CardRegistry>,
    /// Built once; the registry is fixed after load.
    pub catalog: Arc<CardCatalog>,
    pub store: Arc<dyn StateStore>,
    pub gate: ApiKeyGate,
    pub analytics: AnalyticsRecorder,
    pub dispatcher: WebhookDispatcher,
    pub hub: Arc<BroadcastHub>,
    pub metrics: Arc<GatewayMetrics>,
}

impl AppState {
    pub fn new(backends: GatewayBackends, metrics: Arc<GatewayMetrics>) -> Self {
        let GatewayBackends {
            registry,
            store,
            api_keys,
            analytics,
            hub,
        } = backends;

        let dispatcher = WebhookDispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&store),
            hub.clone(),
        );

        Self {
            catalog: Arc::new(registry.catalog()),
            registry,
            store,
            gate: ApiKeyGate::new(api_keys),
            analytics: AnalyticsRecorder::new(analytics),
            dispatcher,
            hub,
            metrics,
        }
    }
}
