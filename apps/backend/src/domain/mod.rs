//! Domain layer: pure draft logic types and helpers.

pub mod assignment;
pub mod catalog;
pub mod draft_transition;
pub mod ids;
pub mod lobby;
pub mod picks;
pub mod selection;
pub mod snake;
pub mod snapshot;
pub mod state;
pub mod voting;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_integration;

// Re-exports for ergonomics
pub use catalog::{FactionEntry, FactionId};
pub use draft_transition::{derive_draft_transitions, DraftLifecycleView, DraftTransition};
pub use ids::{ChannelId, PlayerId};
pub use snapshot::{draft_view, DraftView, PhaseView};
pub use state::{DraftState, MapRef, Phase, Pick, PickCategory, Picks};
