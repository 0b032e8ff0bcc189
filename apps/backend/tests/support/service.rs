use std::sync::Arc;

use drafter::adapters::snapshots::InMemorySnapshotStore;
use drafter::domain::ids::{ChannelId, PlayerId};
use drafter::infra::state::build_state;
use drafter::DraftFlowService;
use drafter_test_support::unique_helpers::{player_names, unique_channel};

/// A service backed by a shared in-memory store and a fixed RNG seed.
///
/// The store is returned so tests can inspect snapshots or hand it to a
/// second service to simulate a restart.
pub fn service_with_memory_store(seed: u64) -> (DraftFlowService, Arc<InMemorySnapshotStore>) {
    let store = Arc::new(InMemorySnapshotStore::new());
    let service = build_state()
        .with_store(store.clone())
        .with_rng_seed(seed)
        .build_service();
    (service, store)
}

pub fn fresh_channel(prefix: &str) -> ChannelId {
    ChannelId::parse(unique_channel(prefix)).expect("unique channel is valid")
}

pub fn players(prefix: &str, count: usize) -> Vec<PlayerId> {
    player_names(prefix, count)
        .into_iter()
        .map(|name| PlayerId::parse(name).expect("player name is valid"))
        .collect()
}

pub fn player(name: &str) -> PlayerId {
    PlayerId::parse(name).expect("player name is valid")
}
