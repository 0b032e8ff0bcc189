//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;
use crate::services::map::DEFAULT_MAP_BASE_URL;

/// Where draft snapshots are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    /// One JSON file per channel under `snapshot_dir`.
    File,
    /// Process-local; lost on restart.
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Persistence
    pub store: StoreKind,
    pub snapshot_dir: PathBuf,

    // Map generator
    pub map_base_url: String,

    /// Fixed RNG seed; unset means seeded from the OS.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("DRAFT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("DRAFT_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "DRAFT_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let store = match env::var("DRAFT_STORE")
            .unwrap_or_else(|_| "file".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "file" => StoreKind::File,
            "memory" => StoreKind::Memory,
            other => {
                return Err(AppError::config(format!(
                    "DRAFT_STORE must be 'file' or 'memory', got '{other}'"
                )))
            }
        };

        let snapshot_dir = env::var("DRAFT_SNAPSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./drafts"));

        let map_base_url =
            env::var("DRAFT_MAP_BASE_URL").unwrap_or_else(|_| DEFAULT_MAP_BASE_URL.to_string());

        let rng_seed = match env::var("DRAFT_RNG_SEED") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("DRAFT_RNG_SEED must be a u64, got '{raw}'"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            store,
            snapshot_dir,
            map_base_url,
            rng_seed,
        })
    }
}
