//! JSON-or-form request bodies.

use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;

use crate::domain::{ApiError, ApiResult};

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Decode a body as form fields when the content type says so, else as JSON.
///
/// Form fields all arrive as JSON strings, so embedded documents are
/// decoded later with [`crate::domain::decode_embedded`].
pub fn decode_body<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> ApiResult<T> {
    if is_form(headers) {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| ApiError::invalid_params(format!("Invalid form body: {}", e)))?;
        let fields: serde_json::Map<String, serde_json::Value> = pairs
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| ApiError::invalid_params(e.to_string()))
    } else {
        serde_json::from_slice(body).map_err(ApiError::from)
    }
}
