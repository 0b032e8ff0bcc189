//! Adapters for external dependencies.

pub mod snapshots;
