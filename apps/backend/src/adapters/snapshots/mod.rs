//! Snapshot storage adapters.

pub mod dto;
mod file;
mod memory;


pub use dto::DraftRecord;
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
