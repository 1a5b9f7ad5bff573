//! Request and response bodies of the HTTP surface.

use serde::{Deserialize, Serialize};
use shared_types::{CardDescriptor, CardInstanceKey};

use super::error::{ApiError, ApiResult};

/// `{ "success": true, ...body }`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

impl Success<serde_json::Map<String, serde_json::Value>> {
    /// Bare `{ "success": true }`.
    pub fn empty() -> Self {
        Self::new(serde_json::Map::new())
    }
}

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CardBody {
    pub card: CardDescriptor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBody {
    pub card_key: CardInstanceKey,
    pub data: serde_json::Value,
}

/// `GET /api/cards`
#[derive(Debug, Default, Deserialize)]
pub struct CardsQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

/// `GET /api/card`
#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    #[serde(default)]
    pub pack: String,
    #[serde(default)]
    pub card: String,
}

/// `POST /api/state`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRequest {
    pub api_key: String,
    pub card_key: String,
    /// JSON-encoded string, or the state document inline.
    pub state: serde_json::Value,
}

/// `POST /api/analytics`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub api_key: String,
    pub card_key: String,
    pub pack: String,
    pub card: String,
    /// JSON-encoded string, or the event(s) inline.
    pub events: serde_json::Value,
}

/// Form bodies carry `state`/`events` as JSON text; JSON bodies may inline
/// the document. A string is decoded, anything else is taken as is.
pub fn decode_embedded(field: &str, value: serde_json::Value) -> ApiResult<serde_json::Value> {
    match value {
        serde_json::Value::String(raw) => serde_json::from_str(&raw)
            .map_err(|e| ApiError::invalid_params(format!("Invalid JSON in {}: {}", field, e))),
        other => Ok(other),
    }
}
