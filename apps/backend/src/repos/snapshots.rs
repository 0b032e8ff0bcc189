//! Snapshot repository: the storage contract plus domain-level helpers.

use async_trait::async_trait;

use crate::adapters::snapshots::DraftRecord;
use crate::domain::ids::ChannelId;
use crate::domain::state::DraftState;
use crate::errors::domain::DomainError;

/// Durable store of one draft record per channel.
///
/// `save` replaces any previous record for the same channel. `load` returns
/// `Ok(None)` when nothing was ever saved.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, record: &DraftRecord) -> Result<(), DomainError>;

    async fn load(&self, channel: &ChannelId) -> Result<Option<DraftRecord>, DomainError>;
}

pub async fn save_draft<S: SnapshotStore + ?Sized>(
    store: &S,
    state: &DraftState,
) -> Result<(), DomainError> {
    store.save(&DraftRecord::from(state)).await
}

/// Load and validate the stored draft for `channel`.
pub async fn load_draft<S: SnapshotStore + ?Sized>(
    store: &S,
    channel: &ChannelId,
) -> Result<Option<DraftState>, DomainError> {
    match store.load(channel).await? {
        Some(record) => DraftState::try_from(record).map(Some),
        None => Ok(None),
    }
}
