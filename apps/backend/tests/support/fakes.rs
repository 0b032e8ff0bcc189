//! Collaborators that always fail, for exercising error paths.

use async_trait::async_trait;
use drafter::adapters::snapshots::DraftRecord;
use drafter::domain::ids::ChannelId;
use drafter::domain::state::MapRef;
use drafter::errors::domain::{DomainError, InfraErrorKind};
use drafter::repos::snapshots::SnapshotStore;
use drafter::services::map::MapProvider;

pub struct FailingStore;

#[async_trait]
impl SnapshotStore for FailingStore {
    async fn save(&self, _record: &DraftRecord) -> Result<(), DomainError> {
        Err(DomainError::infra(InfraErrorKind::Storage, "disk full"))
    }

    async fn load(&self, _channel: &ChannelId) -> Result<Option<DraftRecord>, DomainError> {
        Err(DomainError::infra(InfraErrorKind::Storage, "disk unreadable"))
    }
}

pub struct FailingMapProvider;

#[async_trait]
impl MapProvider for FailingMapProvider {
    async fn generate(&self, _players: usize, _seed: u32) -> Result<MapRef, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::MapProvider,
            "map generator unreachable",
        ))
    }
}
