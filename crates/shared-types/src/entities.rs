//! # Card Entities
//!
//! Identity and payload types that flow between the card-state, catalog,
//! webhook and gateway crates.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CardIdError;

/// Query parameters handed to or returned from a card module.
///
/// A `BTreeMap` keeps the parameters sorted by name, which is the order
/// key derivation folds them in.
pub type UrlParams = BTreeMap<String, String>;

/// Identifies a card within a pack. Names are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    /// Pack the card belongs to.
    pub pack: String,
    /// Card name inside the pack.
    pub card: String,
}

impl CardId {
    /// Build an identifier, rejecting empty or path-like names.
    pub fn new(pack: impl Into<String>, card: impl Into<String>) -> Result<Self, CardIdError> {
        let pack = pack.into();
        let card = card.into();
        validate_segment(&pack).map_err(|reason| CardIdError::InvalidPack { name: pack.clone(), reason })?;
        validate_segment(&card).map_err(|reason| CardIdError::InvalidCard { name: card.clone(), reason })?;
        Ok(Self { pack, card })
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pack, self.card)
    }
}

fn validate_segment(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty name");
    }
    if name.contains('/') || name.contains('?') {
        return Err("name contains a path separator");
    }
    Ok(())
}

/// Catalog entry for a card. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDescriptor {
    /// Pack name.
    pub pack: String,
    /// Card name.
    pub name: String,
    /// Free-form metadata (title, description, author, ...).
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl CardDescriptor {
    pub fn new(pack: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pack: pack.into(),
            name: name.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `description` metadata entry, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(|v| v.as_str())
    }

    /// Identifier of the described card.
    pub fn id(&self) -> CardId {
        CardId {
            pack: self.pack.clone(),
            card: self.name.clone(),
        }
    }
}

/// Deterministic identifier of one (pack, card, parameter-set) combination.
///
/// Addresses state, API key records and realtime subscribers alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardInstanceKey(String);

impl CardInstanceKey {
    /// Wrap an already-derived key, e.g. one supplied by a client.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardInstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CardInstanceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque card state. Stored and forwarded, never inspected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardState(serde_json::Value);

impl CardState {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Decode a JSON-encoded state document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self)
    }

    /// Encode for a byte-oriented backend.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }

    pub fn from_json_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw).map(Self)
    }
}

impl From<serde_json::Value> for CardState {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Secret issued out-of-band for one card instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub card_key: CardInstanceKey,
    pub secret: String,
}

// Secrets never reach logs through Debug.
impl fmt::Debug for ApiKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyRecord")
            .field("card_key", &self.card_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Append-only analytics record. Unrelated to card state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Dot-namespaced key, `pack.card.item-key`.
    pub event_key: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Compose the namespaced analytics key for an item reported by a card.
pub fn compose_event_key(pack: &str, card: &str, item_key: &str) -> String {
    format!("{}.{}.{}", pack, card, item_key)
}
