//! Shared fixtures: a small card pack and a gateway over in-memory backends.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use cs_01_card_state::{InMemoryApiKeyStore, InMemoryStateStore, KeyDeriver};
use cs_02_card_catalog::{
    Capabilities, CardModule, CardModuleError, CardRegistry, DataRequest, DataResponse,
    WebhookReply,
};
use cs_03_realtime_sync::BroadcastHub;
use cs_04_analytics::{AnalyticsError, AnalyticsSink, InMemoryAnalyticsSink};
use cs_06_api_gateway::{build_router, AppState, GatewayBackends, GatewayConfig, GatewayMetrics};
use serde_json::{json, Value};
use shared_types::{AnalyticsEvent, CardDescriptor, CardInstanceKey, CardState, UrlParams};
use tower::ServiceExt;

/// `press/headline`: data + webhook + realtime.
///
/// Webhook payload: `{"edition": "...", "title": "..."}`. The edition is the
/// instance parameter, the title becomes the state. A payload with
/// `"fail": true` makes the handler error.
pub struct Headline;

#[async_trait]
impl CardModule for Headline {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new("press", "headline").with_meta("description", "Breaking news banner")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE.with_data().with_webhook().with_realtime()
    }

    async fn generate(&self, request: DataRequest) -> Result<DataResponse, CardModuleError> {
        let title = request
            .state
            .as_ref()
            .and_then(|s| s.as_value().get("title").cloned())
            .unwrap_or(Value::Null);
        Ok(DataResponse {
            view: json!({ "title": title }),
            state: None,
        })
    }

    async fn webhook(&self, payload: Value) -> Result<WebhookReply, CardModuleError> {
        if payload.get("fail").and_then(Value::as_bool).unwrap_or(false) {
            return Err(CardModuleError::Handler("upstream rejected".into()));
        }
        let Some(title) = payload.get("title").cloned() else {
            return Ok(WebhookReply::default());
        };
        Ok(WebhookReply {
            url_params: edition_params(payload.get("edition").and_then(Value::as_str).unwrap_or("")),
            state: Some(CardState::new(json!({ "title": title }))),
        })
    }
}

/// `press/ticker`: webhook only, no realtime.
pub struct Ticker;

#[async_trait]
impl CardModule for Ticker {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new("press", "ticker")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE.with_webhook()
    }

    async fn webhook(&self, payload: Value) -> Result<WebhookReply, CardModuleError> {
        Ok(WebhookReply {
            url_params: UrlParams::new(),
            state: Some(CardState::new(payload)),
        })
    }
}

/// `press/static`: no capabilities at all.
pub struct Static;

#[async_trait]
impl CardModule for Static {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new("press", "static")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
}

pub fn edition_params(edition: &str) -> UrlParams {
    let mut params = UrlParams::new();
    if !edition.is_empty() {
        params.insert("edition".into(), edition.into());
    }
    params
}

/// Instance key of `press/headline` for an edition.
pub fn headline_key(edition: &str) -> CardInstanceKey {
    KeyDeriver::derive("press", "headline", &edition_params(edition))
}

/// Records every event except those whose key contains `reject`.
#[derive(Default)]
pub struct RejectingSink {
    pub inner: InMemoryAnalyticsSink,
}

#[async_trait]
impl AnalyticsSink for RejectingSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        if event.event_key.contains("reject") {
            return Err(AnalyticsError::Sink(format!("rejected {}", event.event_key)));
        }
        self.inner.record(event).await
    }
}

/// A gateway over in-memory backends, with handles on each backend.
pub struct Harness {
    pub router: Router,
    pub store: Arc<InMemoryStateStore>,
    pub keys: Arc<InMemoryApiKeyStore>,
    pub sink: Arc<RejectingSink>,
    pub hub: Arc<BroadcastHub>,
    pub metrics: Arc<GatewayMetrics>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        let mut registry = CardRegistry::new();
        for module in [
            Arc::new(Headline) as Arc<dyn CardModule>,
            Arc::new(Ticker),
            Arc::new(Static),
        ] {
            registry.register(module).expect("fixture pack registers");
        }

        let store = Arc::new(InMemoryStateStore::new());
        let keys = Arc::new(InMemoryApiKeyStore::new());
        let sink = Arc::new(RejectingSink::default());
        let hub = Arc::new(BroadcastHub::new(config.realtime.channel_capacity));
        let metrics = Arc::new(GatewayMetrics::new());

        let backends = GatewayBackends {
            registry: Arc::new(registry),
            store: store.clone(),
            api_keys: keys.clone(),
            analytics: sink.clone(),
            hub: hub.clone(),
        };
        let router = build_router(AppState::new(backends, Arc::clone(&metrics)), &config);

        Self {
            router,
            store,
            keys,
            sink,
            hub,
            metrics,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post(uri, "application/json", body.to_string()).await
    }

    pub async fn post(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", content_type)
                .body(body.into())
                .expect("request"),
        )
        .await
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
