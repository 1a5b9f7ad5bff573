//! # cs-05-webhook-dispatch
//!
//! Inbound webhook handling for Card-Sync.
//!
//! ```text
//! POST /api/webhook/{pack}/{card}
//!        │
//!        ▼
//!  [CardRegistry.resolve] ──none──→ ack {}
//!        │
//!  parse payload (bad JSON → {})
//!        │
//!  webhook capability? ──no──→ ack {}
//!        │
//!  module.webhook(payload) ──err──→ ack {}
//!        │
//!  KeyDeriver(pack, card, urlParams)
//!        ├──→ StateStore.set          (best effort)
//!        └──→ RealtimeSync.push       (best effort, realtime cards only)
//!        │
//!      ack {}
//! ```
//!
//! Persist and push run concurrently with no ordering between them; a
//! failure in one never rolls back the other.

pub mod dispatcher;
pub mod payload;

pub use dispatcher::{DispatchOutcome, WebhookDispatcher};
pub use payload::{parse_payload, PayloadEncoding, PayloadError};
