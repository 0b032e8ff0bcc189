//! One pretty-printed JSON file per channel under a snapshot directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::dto::DraftRecord;
use crate::domain::ids::ChannelId;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::snapshots::SnapshotStore;

pub struct FileSnapshotStore {
    dir: PathBuf,
}

fn storage(context: &str, path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::Storage,
        format!("{context} {}: {err}", path.display()),
    )
}

impl FileSnapshotStore {
    /// Open (creating if needed) the snapshot directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage("create snapshot dir", &dir, e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, channel: &ChannelId) -> PathBuf {
        self.dir.join(format!("draft_{channel}.json"))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, record: &DraftRecord) -> Result<(), DomainError> {
        let channel = ChannelId::parse(record.channel.as_str())?;
        let path = self.path_for(&channel);
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| storage("serialize snapshot for", &path, e))?;
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| storage("write", &tmp, e))?;
        // Rename is atomic within a directory; readers never see a torn file.
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage("rename into", &path, e))?;

        debug!(channel = %channel, path = %path.display(), "Snapshot written");
        Ok(())
    }

    async fn load(&self, channel: &ChannelId) -> Result<Option<DraftRecord>, DomainError> {
        let path = self.path_for(channel);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage("read", &path, e)),
        };
        let record = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("unreadable snapshot {}: {e}", path.display()),
            )
        })?;
        Ok(Some(record))
    }
}
