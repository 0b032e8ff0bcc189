//! Draft flow orchestration service - bridges the pure draft state machine
//! with the session registry, snapshot storage and the map provider.

mod lifecycle;
mod mutation;
mod player_actions;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::domain::draft_transition::DraftTransition;
use crate::domain::snapshot::DraftView;
use crate::repos::snapshots::SnapshotStore;
use crate::services::map::MapProvider;
use crate::services::registry::SessionRegistry;

/// Success payload of every draft action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub view: DraftView,
    pub transitions: Vec<DraftTransition>,
}

pub struct DraftFlowService {
    registry: SessionRegistry,
    store: Arc<dyn SnapshotStore>,
    maps: Arc<dyn MapProvider>,
    /// Never held across an await.
    rng: Mutex<StdRng>,
}

impl DraftFlowService {
    pub fn new(store: Arc<dyn SnapshotStore>, maps: Arc<dyn MapProvider>, rng: StdRng) -> Self {
        Self {
            registry: SessionRegistry::new(),
            store,
            maps,
            rng: Mutex::new(rng),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }
}
