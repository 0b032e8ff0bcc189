//! Service layer: orchestration over the pure draft domain.

pub mod draft_flow;
pub mod map;
pub mod registry;
