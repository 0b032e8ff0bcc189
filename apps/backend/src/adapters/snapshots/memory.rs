use async_trait::async_trait;
use dashmap::DashMap;

use super::dto::DraftRecord;
use crate::domain::ids::ChannelId;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::snapshots::SnapshotStore;

/// Process-local store. Records are kept as JSON so they go through the
/// same serialization path as the file store.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    records: DashMap<ChannelId, String>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, record: &DraftRecord) -> Result<(), DomainError> {
        let channel = ChannelId::parse(record.channel.as_str())?;
        let json = serde_json::to_string(record)
            .map_err(|e| DomainError::infra(InfraErrorKind::Storage, e.to_string()))?;
        self.records.insert(channel, json);
        Ok(())
    }

    async fn load(&self, channel: &ChannelId) -> Result<Option<DraftRecord>, DomainError> {
        let Some(json) = self.records.get(channel).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| DomainError::infra(InfraErrorKind::DataCorruption, e.to_string()))
    }
}
