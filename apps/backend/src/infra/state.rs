use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::adapters::snapshots::{FileSnapshotStore, InMemorySnapshotStore};
use crate::config::app::{AppConfig, StoreKind};
use crate::error::AppError;
use crate::repos::snapshots::SnapshotStore;
use crate::services::draft_flow::DraftFlowService;
use crate::services::map::{GeneratorUrlProvider, MapProvider};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    store: Option<Arc<dyn SnapshotStore>>,
    maps: Option<Arc<dyn MapProvider>>,
    rng_seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            maps: None,
            rng_seed: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_map_provider(mut self, maps: Arc<dyn MapProvider>) -> Self {
        self.maps = Some(maps);
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Apply everything `config` specifies. Opens the snapshot directory
    /// when the file store is selected.
    pub async fn with_config(mut self, config: &AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn SnapshotStore> = match config.store {
            StoreKind::File => Arc::new(FileSnapshotStore::open(&config.snapshot_dir).await?),
            StoreKind::Memory => Arc::new(InMemorySnapshotStore::new()),
        };
        self.store = Some(store);
        self.maps = Some(Arc::new(GeneratorUrlProvider::new(&config.map_base_url)));
        self.rng_seed = config.rng_seed;
        Ok(self)
    }

    pub fn build_service(self) -> DraftFlowService {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemorySnapshotStore::new()));
        let maps = self
            .maps
            .unwrap_or_else(|| Arc::new(GeneratorUrlProvider::default()));
        let rng = match self.rng_seed {
            Some(seed) => {
                info!(seed, "Using fixed RNG seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        DraftFlowService::new(store, maps, rng)
    }

    pub fn build(self) -> AppState {
        AppState::new(self.build_service())
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
