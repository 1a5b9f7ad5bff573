//! Append-only JSON-lines event file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shared_types::AnalyticsEvent;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::AnalyticsSink;
use crate::AnalyticsError;

/// One JSON document per line. Lines are written whole under a lock, so
/// concurrent submissions never interleave.
pub struct JsonLinesAnalyticsSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesAnalyticsSink {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AnalyticsSink for JsonLinesAnalyticsSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
