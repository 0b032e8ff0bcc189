use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::catalog::FactionId;
use crate::domain::ids::PlayerId;
use crate::domain::snake::TurnCursor;
use crate::domain::state::{require_enrolled, require_phase, DraftState, Phase, Selection};
use crate::domain::voting::{enter_snake_draft, voting_complete};
use crate::errors::domain::{DomainError, ValidationKind};

/// Record a player's primary/optional pair. When the last player submits,
/// the draft order is drawn and the phase moves on to Voting (or straight to
/// the snake draft if nothing is left to vote on).
pub fn submit_selection<R: Rng + ?Sized>(
    state: &mut DraftState,
    who: &PlayerId,
    primary: FactionId,
    optional: FactionId,
    rng: &mut R,
) -> Result<(), DomainError> {
    require_phase(state, Phase::Selecting, "select")?;
    require_enrolled(state, who)?;

    if state.selections.contains_key(who) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyActed,
            format!("{who} has already submitted a selection"),
        ));
    }

    let hand = state.assigned_to(who).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: enrolled player has no assignment")
    })?;
    for faction in [primary, optional] {
        if !hand.contains(&faction) {
            return Err(DomainError::validation(
                ValidationKind::FactionNotAssigned,
                format!("{faction} is not one of your assigned factions"),
            ));
        }
    }
    if primary == optional {
        return Err(DomainError::validation(
            ValidationKind::SameFaction,
            "Primary and optional factions must differ",
        ));
    }

    state.optional_pool.remove(&primary);
    state.final_pool.insert(primary);
    if !state.final_pool.contains(&optional) {
        state.optional_pool.insert(optional);
    }
    state
        .selections
        .insert(who.clone(), Selection { primary, optional });

    if state.selections.len() == state.player_count() {
        enter_voting(state, rng);
    }
    Ok(())
}

/// Selecting -> Voting. Draws the draft order used for the rest of the
/// session.
fn enter_voting<R: Rng + ?Sized>(state: &mut DraftState, rng: &mut R) {
    let mut order = state.players.clone();
    order.shuffle(rng);
    state.draft_order = order;
    state.cursor = TurnCursor::start();
    state.phase = Phase::Voting;

    if voting_complete(state) {
        enter_snake_draft(state);
    }
}
