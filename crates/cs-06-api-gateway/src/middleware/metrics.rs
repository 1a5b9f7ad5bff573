//! Gateway counters, exposed as JSON on `/metrics`.

use axum::{body::Body, http::Request, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// API Gateway metrics
#[derive(Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // State path
    pub state_writes: AtomicU64,
    pub auth_rejected: AtomicU64,

    // Webhook path
    pub webhooks_received: AtomicU64,
    pub webhook_state_updates: AtomicU64,
    pub webhook_failures: AtomicU64,

    // Analytics
    pub analytics_events: AtomicU64,

    // Realtime
    pub realtime_connections: AtomicU64,
    pub realtime_frames_sent: AtomicU64,

    // Latency tracking (simplified - in production use histograms)
    pub total_latency_ms: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request
    pub fn record_request(&self, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_state_write(&self) {
        self.state_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auth_rejection(&self) {
        self.auth_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a webhook and how it ended internally
    pub fn record_webhook(&self, state_updated: bool, failed: bool) {
        self.webhooks_received.fetch_add(1, Ordering::Relaxed);
        if state_updated {
            self.webhook_state_updates.fetch_add(1, Ordering::Relaxed);
        }
        if failed {
            self.webhook_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_analytics_events(&self, count: usize) {
        self.analytics_events.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_realtime_connect(&self) {
        self.realtime_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_realtime_disconnect(&self) {
        self.realtime_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_realtime_frame(&self) {
        self.realtime_frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON. `realtime_pushes` comes from the hub.
    pub fn to_json(&self, realtime_pushes: u64) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
            },
            "state": {
                "writes": self.state_writes.load(Ordering::Relaxed),
                "auth_rejected": self.auth_rejected.load(Ordering::Relaxed),
            },
            "webhooks": {
                "received": self.webhooks_received.load(Ordering::Relaxed),
                "state_updates": self.webhook_state_updates.load(Ordering::Relaxed),
                "failures": self.webhook_failures.load(Ordering::Relaxed),
            },
            "analytics": {
                "events": self.analytics_events.load(Ordering::Relaxed),
            },
            "realtime": {
                "connections": self.realtime_connections.load(Ordering::Relaxed),
                "frames_sent": self.realtime_frames_sent.load(Ordering::Relaxed),
                "pushes": realtime_pushes,
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Counts every request and its outcome
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<GatewayMetrics>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for MetricsService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let metrics = Arc::clone(&self.metrics);
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let success = matches!(&result, Ok(r) if !r.status().is_client_error() && !r.status().is_server_error());
            metrics.record_request(success, start.elapsed().as_millis() as u64);
            result
        })
    }
}
