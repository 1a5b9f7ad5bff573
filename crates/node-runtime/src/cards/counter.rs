//! `demo/counter`: a labelled counter driven by webhooks.
//!
//! The webhook payload carries the instance parameters and the new count:
//!
//! ```json
//! { "params": { "label": "lobby" }, "count": 7 }
//! ```
//!
//! Rendering `/api/data/demo/counter?label=lobby` reads back the same
//! instance; the first render of an instance stores a zero count.

use async_trait::async_trait;
use cs_02_card_catalog::{
    Capabilities, CardModule, CardModuleError, DataRequest, DataResponse, WebhookReply,
};
use serde_json::{json, Value};
use shared_types::{CardDescriptor, CardState, UrlParams};

pub const PACK: &str = "demo";
pub const NAME: &str = "counter";

const DEFAULT_LABEL: &str = "Counter";

#[derive(Debug, Default)]
pub struct CounterCard;

impl CounterCard {
    fn count(state: Option<&CardState>) -> i64 {
        state
            .and_then(|s| s.as_value().get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl CardModule for CounterCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(PACK, NAME)
            .with_meta("title", "Counter")
            .with_meta("description", "Live counter updated by webhook")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE.with_data().with_webhook().with_realtime()
    }

    async fn generate(&self, request: DataRequest) -> Result<DataResponse, CardModuleError> {
        let label = request
            .params
            .get("label")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());
        let count = Self::count(request.state.as_ref());

        // First render claims the instance with a zero count
        let state = match request.state {
            Some(_) => None,
            None => Some(CardState::new(json!({ "count": 0 }))),
        };

        Ok(DataResponse {
            view: json!({ "label": label, "count": count }),
            state,
        })
    }

    async fn webhook(&self, payload: Value) -> Result<WebhookReply, CardModuleError> {
        let count = payload
            .get("count")
            .and_then(Value::as_i64)
            .ok_or_else(|| CardModuleError::Handler("payload.count must be an integer".into()))?;

        Ok(WebhookReply {
            url_params: params_of(&payload),
            state: Some(CardState::new(json!({ "count": count }))),
        })
    }
}

/// `payload.params` as string parameters. Non-string scalars are rendered
/// with their JSON text; nested values are skipped.
fn params_of(payload: &Value) -> UrlParams {
    let Some(params) = payload.get("params").and_then(Value::as_object) else {
        return UrlParams::new();
    };

    params
        .iter()
        .filter_map(|(name, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(_) | Value::Bool(_) => value.to_string(),
                _ => return None,
            };
            Some((name.clone(), rendered))
        })
        .collect()
}
