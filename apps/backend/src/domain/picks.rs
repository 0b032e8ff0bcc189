use crate::domain::ids::PlayerId;
use crate::domain::state::{require_enrolled, require_phase, require_turn, DraftState, Phase, Pick};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Apply one snake-draft pick for the player holding the turn. Returns
/// `true` when this pick completed the draft.
pub fn make_pick(state: &mut DraftState, who: &PlayerId, pick: Pick) -> Result<bool, DomainError> {
    require_phase(state, Phase::SnakeDraft, "pick")?;
    require_enrolled(state, who)?;
    require_turn(state, who)?;

    let category = pick.category();
    let already = state
        .picks
        .get(who)
        .is_some_and(|p| p.is_filled(category));
    if already {
        return Err(DomainError::validation(
            ValidationKind::CategoryAlreadyPicked,
            format!("{who} has already picked a {category}"),
        ));
    }

    match pick {
        Pick::Faction(faction) => {
            if !state.final_pool.contains(&faction) {
                return Err(DomainError::validation(
                    ValidationKind::NotInFinalPool,
                    format!("{faction} is not in the selectable pool"),
                ));
            }
            if !state.pickable_factions().contains(&faction) {
                return Err(DomainError::conflict(
                    ConflictKind::FactionTaken,
                    format!("{faction} has already been picked"),
                ));
            }
        }
        Pick::Location(value) => {
            if !state.available_locations.remove(&value) {
                return Err(DomainError::validation(
                    ValidationKind::LocationUnavailable,
                    format!("Location {value} is not available"),
                ));
            }
        }
        Pick::Strategy(value) => {
            if !state.available_strategies.remove(&value) {
                return Err(DomainError::validation(
                    ValidationKind::StrategyUnavailable,
                    format!("Strategy {value} is not available"),
                ));
            }
        }
    }

    let entry = state.picks.entry(who.clone()).or_default();
    match pick {
        Pick::Faction(f) => entry.faction = Some(f),
        Pick::Location(v) => entry.location = Some(v),
        Pick::Strategy(v) => entry.strategy = Some(v),
    }

    state.cursor.advance(state.draft_order.len());

    let complete = state.players.iter().all(|p| {
        state
            .picks
            .get(p)
            .is_some_and(|picks| picks.is_complete())
    });
    if complete {
        state.phase = Phase::Complete;
    }
    Ok(complete)
}
