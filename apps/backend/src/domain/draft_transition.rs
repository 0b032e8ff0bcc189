use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::catalog::{FactionEntry, FactionId};
use crate::domain::ids::PlayerId;
use crate::domain::state::{DraftState, Phase};

/// The slice of a draft that transitions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLifecycleView {
    pub phase: Phase,
    pub to_act: Option<PlayerId>,
    pub final_pool: BTreeSet<FactionId>,
    pub round: u32,
}

impl DraftLifecycleView {
    pub fn of(state: &DraftState) -> Self {
        Self {
            phase: state.phase,
            to_act: state.to_act().cloned(),
            final_pool: state.final_pool.clone(),
            round: state.cursor.round,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftTransition {
    /// Explicit: a session was opened for the channel.
    SessionOpened,

    /// Explicit: a session was restored from its snapshot.
    SessionLoaded,

    /// Explicit: a player enrolled.
    PlayerJoined { player: PlayerId },

    /// Explicit: the map was redrawn.
    MapRegenerated { seed: u32 },

    /// Edge-triggered: the phase moved forward.
    PhaseChanged { from: Phase, to: Phase },

    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player: PlayerId },

    /// Edge-triggered: an optional faction reached quorum.
    FactionPromoted { faction: FactionEntry },

    /// Edge-triggered: a new forward sweep of the snake draft began.
    RoundStarted { round: u32 },

    /// Edge-triggered: every player holds all three picks.
    DraftCompleted,
}

/// Derive draft transitions from before/after lifecycle state.
pub fn derive_draft_transitions(
    before: &DraftLifecycleView,
    after: &DraftLifecycleView,
) -> Vec<DraftTransition> {
    let mut transitions = Vec::new();

    if before.phase != after.phase {
        transitions.push(DraftTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    // Primaries enter the pool during Selecting; only Voting promotes.
    if before.phase == Phase::Voting {
        for faction in after.final_pool.difference(&before.final_pool) {
            transitions.push(DraftTransition::FactionPromoted {
                faction: faction.entry(),
            });
        }
    }

    if before.phase == Phase::SnakeDraft
        && after.phase == Phase::SnakeDraft
        && after.round > before.round
    {
        transitions.push(DraftTransition::RoundStarted { round: after.round });
    }

    // A phase change always re-announces the turn holder.
    if let Some(player) = &after.to_act {
        if before.to_act.as_ref() != Some(player) || before.phase != after.phase {
            transitions.push(DraftTransition::TurnBecame {
                player: player.clone(),
            });
        }
    }

    if before.phase != Phase::Complete && after.phase == Phase::Complete {
        transitions.push(DraftTransition::DraftCompleted);
    }

    transitions
}
