//! Idle-phase operations: enrollment, starting the draft, and the map.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::domain::assignment::assign_factions;
use crate::domain::ids::PlayerId;
use crate::domain::state::{require_enrolled, require_phase, DraftState, MapRef, Phase, Picks};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 2;
pub const MAP_SEED_RANGE: RangeInclusive<u32> = 1..=9999;

pub fn join(state: &mut DraftState, who: PlayerId) -> Result<(), DomainError> {
    require_phase(state, Phase::Idle, "join")?;
    if state.is_enrolled(&who) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyJoined,
            format!("{who} already joined this draft"),
        ));
    }
    state.players.push(who);
    Ok(())
}

pub fn ensure_can_begin(state: &DraftState) -> Result<(), DomainError> {
    require_phase(state, Phase::Idle, "begin the draft")?;
    if state.player_count() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::InsufficientPlayers,
            format!(
                "Need at least {MIN_PLAYERS} players to begin, have {}",
                state.player_count()
            ),
        ));
    }
    Ok(())
}

pub fn draw_map_seed<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(MAP_SEED_RANGE)
}

/// Idle -> Selecting. The map must already be generated for the current
/// player count.
pub fn begin<R: Rng + ?Sized>(
    state: &mut DraftState,
    map: MapRef,
    rng: &mut R,
) -> Result<(), DomainError> {
    ensure_can_begin(state)?;

    state.assigned = assign_factions(&state.players, rng)?;

    let count = u32::try_from(state.player_count())
        .map_err(|_| DomainError::validation_other("Too many players"))?;
    state.available_locations = (1..=count).collect();
    state.available_strategies = (1..=count).collect();
    state.picks = state
        .players
        .iter()
        .map(|p| (p.clone(), Picks::default()))
        .collect::<BTreeMap<_, _>>();
    state.map = Some(map);
    state.phase = Phase::Selecting;
    Ok(())
}

pub fn ensure_can_regenerate_map(state: &DraftState, who: &PlayerId) -> Result<(), DomainError> {
    require_phase(state, Phase::Selecting, "regenerate the map")?;
    require_enrolled(state, who)
}

pub fn replace_map(state: &mut DraftState, map: MapRef) {
    state.map = Some(map);
}
