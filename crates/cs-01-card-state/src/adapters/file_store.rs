//! # File-backed State Store
//!
//! One JSON document per card instance under a data directory. File names
//! are the hex encoding of the instance key, so client-supplied keys can
//! never escape the directory.
//!
//! Writes go to a unique temporary file first and are renamed into place,
//! so a reader sees either the previous or the new document, never a torn
//! one. Concurrent writers race on the rename; the last rename wins.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use shared_types::{CardInstanceKey, CardState};
use tracing::debug;

use crate::domain::StateStoreError;
use crate::ports::StateStore;

/// Extension of committed state documents.
const STATE_EXTENSION: &str = "json";

pub struct FileStateStore {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileStateStore {
    /// Open the store, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StateStoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            tmp_counter: AtomicU64::new(0),
        })
    }

    fn path_for(&self, key: &CardInstanceKey) -> PathBuf {
        self.dir
            .join(format!("{}.{}", hex::encode(key.as_str()), STATE_EXTENSION))
    }

    fn tmp_path_for(&self, key: &CardInstanceKey) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            ".{}.{}.{}.tmp",
            hex::encode(key.as_str()),
            std::process::id(),
            n
        ))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &CardInstanceKey) -> Result<Option<CardState>, StateStoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(CardState::from_json_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &CardInstanceKey, state: CardState) -> Result<(), StateStoreError> {
        let bytes = state.to_json_vec()?;
        let tmp = self.tmp_path_for(key);
        let target = self.path_for(key);

        tokio::fs::write(&tmp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(card_key = %key, bytes = bytes.len(), "State written");
        Ok(())
    }
}
