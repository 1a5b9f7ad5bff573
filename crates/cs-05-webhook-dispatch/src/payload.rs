//! Inbound webhook payload decoding.

use std::fmt;

/// How the webhook body is encoded, taken from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Raw JSON document.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` with a JSON `payload` field.
    Form,
}

impl PayloadEncoding {
    /// Pick the encoding from a `Content-Type` header value.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.trim_start().starts_with("application/x-www-form-urlencoded") => Self::Form,
            _ => Self::Json,
        }
    }
}

#[derive(Debug)]
pub enum PayloadError {
    Json(serde_json::Error),
    MissingField,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Json(e) => write!(f, "invalid JSON payload: {}", e),
            PayloadError::MissingField => f.write_str("form body has no payload field"),
        }
    }
}

impl std::error::Error for PayloadError {}

/// Decode a webhook body. An empty body decodes to `{}`.
pub fn parse_payload(body: &[u8], encoding: PayloadEncoding) -> Result<serde_json::Value, PayloadError> {
    let raw = match encoding {
        PayloadEncoding::Json => body.to_vec(),
        PayloadEncoding::Form => form_urlencoded::parse(body)
            .find(|(name, _)| name == "payload")
            .map(|(_, value)| value.into_owned().into_bytes())
            .ok_or(PayloadError::MissingField)?,
    };

    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(&raw).map_err(PayloadError::Json)
}
