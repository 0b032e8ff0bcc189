//! Turn-gated quorum voting over the optional pool.

use crate::domain::catalog::FactionId;
use crate::domain::ids::PlayerId;
use crate::domain::snake::TurnCursor;
use crate::domain::state::{require_enrolled, require_phase, require_turn, DraftState, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

/// Distinct voters needed to promote an optional faction.
pub const QUORUM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub promoted: bool,
    pub voting_closed: bool,
}

pub fn cast_vote(
    state: &mut DraftState,
    who: &PlayerId,
    faction: FactionId,
) -> Result<VoteOutcome, DomainError> {
    require_phase(state, Phase::Voting, "vote")?;
    require_enrolled(state, who)?;
    require_turn(state, who)?;

    if state.final_pool.contains(&faction) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPromoted,
            format!("{faction} is already selectable"),
        ));
    }
    if !state.optional_pool.contains(&faction) {
        return Err(DomainError::validation(
            ValidationKind::NotInOptionalPool,
            format!("{faction} was not proposed as an optional faction"),
        ));
    }

    let voters = state.votes.entry(faction).or_default();
    voters.insert(who.clone());
    let promoted = voters.len() >= QUORUM;
    if promoted {
        state.optional_pool.remove(&faction);
        state.final_pool.insert(faction);
    }

    state.cursor.rotate(state.draft_order.len());

    let voting_closed = voting_complete(state);
    if voting_closed {
        enter_snake_draft(state);
    }
    Ok(VoteOutcome {
        promoted,
        voting_closed,
    })
}

/// Voting ends once nothing is left to promote, or once every player in the
/// draft order has had a vote accepted.
pub fn voting_complete(state: &DraftState) -> bool {
    state.optional_pool.is_empty()
        || state
            .draft_order
            .iter()
            .all(|p| state.votes.values().any(|voters| voters.contains(p)))
}

/// Voting -> SnakeDraft, reusing the draft order.
pub fn enter_snake_draft(state: &mut DraftState) {
    state.cursor = TurnCursor::start();
    state.phase = Phase::SnakeDraft;
}
