//! # Error Types
//!
//! Errors shared across the card crates.

use thiserror::Error;

/// A pack or card name that cannot address a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardIdError {
    #[error("Invalid pack name {name:?}: {reason}")]
    InvalidPack { name: String, reason: &'static str },

    #[error("Invalid card name {name:?}: {reason}")]
    InvalidCard { name: String, reason: &'static str },
}
