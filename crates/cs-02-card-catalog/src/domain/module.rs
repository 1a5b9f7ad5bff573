//! The card module contract.
//!
//! A card is consumed only through the capabilities it declares. Methods for
//! undeclared capabilities keep their default body and are never called.

use async_trait::async_trait;
use shared_types::{CardDescriptor, CardState, UrlParams};
use thiserror::Error;

/// Capability flags declared by a card module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Produces a view model from inputs and prior state.
    pub data: bool,
    /// Accepts inbound webhook payloads.
    pub webhook: bool,
    /// State changes may be pushed to live subscribers.
    pub realtime: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        data: false,
        webhook: false,
        realtime: false,
    };

    pub const fn with_data(mut self) -> Self {
        self.data = true;
        self
    }

    pub const fn with_webhook(mut self) -> Self {
        self.webhook = true;
        self
    }

    pub const fn with_realtime(mut self) -> Self {
        self.realtime = true;
        self
    }
}

/// Input to the data-generation capability.
#[derive(Debug, Clone, Default)]
pub struct DataRequest {
    pub params: UrlParams,
    /// State stored for the derived instance, if any.
    pub state: Option<CardState>,
}

/// Output of the data-generation capability.
#[derive(Debug, Clone, Default)]
pub struct DataResponse {
    /// View model handed to the renderer.
    pub view: serde_json::Value,
    /// Replacement state; `None` leaves stored state untouched.
    pub state: Option<CardState>,
}

/// Output of the webhook capability.
#[derive(Debug, Clone, Default)]
pub struct WebhookReply {
    /// Parameters identifying the instance the state belongs to.
    pub url_params: UrlParams,
    /// New state; `None` means nothing to persist.
    pub state: Option<CardState>,
}

#[derive(Debug, Clone, Error)]
pub enum CardModuleError {
    /// Capability called without being declared.
    #[error("capability not supported: {0}")]
    Unsupported(&'static str),

    /// The card's own handler reported an error.
    #[error("card handler error: {0}")]
    Handler(String),
}

/// A card implementation registered under (pack, card).
#[async_trait]
pub trait CardModule: Send + Sync {
    /// Catalog entry; `pack` and `name` are the registry key.
    fn descriptor(&self) -> CardDescriptor;

    fn capabilities(&self) -> Capabilities;

    async fn generate(&self, _request: DataRequest) -> Result<DataResponse, CardModuleError> {
        Err(CardModuleError::Unsupported("data"))
    }

    async fn webhook(&self, _payload: serde_json::Value) -> Result<WebhookReply, CardModuleError> {
        Err(CardModuleError::Unsupported("webhook"))
    }
}
