use thiserror::Error;

/// Failure reported by a state backend. The message is passed through to
/// clients unchanged, so backends must not embed secrets in it.
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("State encoding error: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StateStoreError {
    fn from(e: std::io::Error) -> Self {
        StateStoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StateStoreError {
    fn from(e: serde_json::Error) -> Self {
        StateStoreError::Serialization(e.to_string())
    }
}

/// Failure looking up an API key record.
#[derive(Debug, Clone, Error)]
pub enum ApiKeyStoreError {
    #[error("{0}")]
    Backend(String),
}
