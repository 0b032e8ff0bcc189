//! Map reference provider.

use async_trait::async_trait;

use crate::domain::state::MapRef;
use crate::errors::domain::DomainError;

pub const DEFAULT_MAP_BASE_URL: &str = "https://keeganw.github.io/ti4/";

/// Produces an opaque map reference for a table size and seed. The draft
/// stores the result but never interprets it.
#[async_trait]
pub trait MapProvider: Send + Sync {
    async fn generate(&self, players: usize, seed: u32) -> Result<MapRef, DomainError>;
}

/// Builds a link to the TI4 map generator with the settings pre-filled.
#[derive(Debug, Clone)]
pub struct GeneratorUrlProvider {
    base_url: String,
}

impl GeneratorUrlProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GeneratorUrlProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_BASE_URL)
    }
}

#[async_trait]
impl MapProvider for GeneratorUrlProvider {
    async fn generate(&self, players: usize, seed: u32) -> Result<MapRef, DomainError> {
        Ok(MapRef {
            seed,
            url: format!("{}?settings=TFFFF{players}000{seed}FFF", self.base_url),
        })
    }
}
