//! API Gateway error types.
//!
//! Every client-facing failure is rendered as the same envelope:
//!
//! ```json
//! { "error": true, "message": "..." }
//! ```
//!
//! Webhook-path failures never reach this type; see `cs_05_webhook_dispatch`.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cs_01_card_state::StateStoreError;
use cs_04_analytics::AnalyticsError;
use serde::Serialize;
use std::fmt;

/// Message for unknown cards on the direct lookup paths.
pub const CARD_NOT_FOUND: &str = "Card not found";

/// Error class, mapped onto an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed body or field.
    Param,
    /// API key rejected.
    Auth,
    NotFound,
    /// State backend failure.
    Storage,
    /// Any analytics batch failure.
    Analytics,
    /// Body over `limits.max_request_size`.
    PayloadTooLarge,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Param | ErrorKind::Auth => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::Storage | ErrorKind::Analytics | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Client-facing error
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Malformed JSON or missing field
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Param, details)
    }

    /// Rejected API key; `reason` is the gate's composed message
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, reason)
    }

    pub fn card_not_found() -> Self {
        Self::new(ErrorKind::NotFound, CARD_NOT_FOUND)
    }

    /// Backend message is passed through
    pub fn storage(e: &StateStoreError) -> Self {
        Self::new(ErrorKind::Storage, e.to_string())
    }

    pub fn analytics(e: &AnalyticsError) -> Self {
        Self::new(ErrorKind::Analytics, e.to_string())
    }

    pub fn payload_too_large() -> Self {
        Self::new(ErrorKind::PayloadTooLarge, "Request body too large")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, format!("Internal error: {}", details.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status().as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: bool,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: true,
            message: &self.message,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StateStoreError> for ApiError {
    fn from(e: StateStoreError) -> Self {
        ApiError::storage(&e)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(e: AnalyticsError) -> Self {
        match e {
            AnalyticsError::InvalidEvents(details) => ApiError::invalid_params(details),
            other => ApiError::analytics(&other),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large()
        } else {
            ApiError::invalid_params(rejection.body_text())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::invalid_params(format!("Invalid JSON: {}", e))
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (not client-facing)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an error
    #[error("server error: {0}")]
    Serve(String),
}
