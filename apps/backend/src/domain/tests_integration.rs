//! Whole-draft walkthrough over pure domain operations.

use crate::domain::lobby::{begin, ensure_can_begin, join};
use crate::domain::picks::make_pick;
use crate::domain::selection::submit_selection;
use crate::domain::state::{DraftState, Phase, Pick};
use crate::domain::test_state_helpers::{fid, lobby, pid, rng, selecting, test_map};
use crate::domain::voting::cast_vote;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[test]
fn lobby_guards() {
    let mut state = lobby(&["a"]);
    assert!(matches!(
        ensure_can_begin(&state),
        Err(DomainError::Validation(ValidationKind::InsufficientPlayers, _))
    ));
    assert!(matches!(
        join(&mut state, pid("a")),
        Err(DomainError::Conflict(ConflictKind::AlreadyJoined, _))
    ));

    join(&mut state, pid("b")).unwrap();
    begin(&mut state, test_map(), &mut rng(1)).unwrap();
    assert!(matches!(
        join(&mut state, pid("c")),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
    assert_eq!(state.players.len(), 2);
}

#[test]
fn three_player_draft_runs_to_completion() {
    let names = ["ann", "ben", "cat"];
    let mut state = lobby(&names);
    let mut r = rng(77);
    begin(&mut state, test_map(), &mut r).unwrap();
    assert_eq!(state.phase, Phase::Selecting);

    for name in names {
        let hand = state.assigned[&pid(name)];
        submit_selection(&mut state, &pid(name), hand[0], hand[1], &mut r).unwrap();
    }
    assert!(state.phase >= Phase::Voting);

    while state.phase == Phase::Voting {
        let who = state.to_act().cloned().unwrap();
        let target = *state.optional_pool.iter().next().unwrap();
        cast_vote(&mut state, &who, target).unwrap();
    }
    assert_eq!(state.phase, Phase::SnakeDraft);
    assert!(state.final_pool.len() >= 3);

    let mut guard = 0;
    while state.phase == Phase::SnakeDraft {
        guard += 1;
        assert!(guard <= 9, "nine picks complete a three-player draft");
        let who = state.to_act().cloned().unwrap();
        let mine = state.picks[&who];
        let pick = if mine.faction.is_none() {
            let taken = state.taken_factions();
            let f = state.final_pool.iter().find(|f| !taken.contains(f)).copied().unwrap();
            Pick::Faction(f)
        } else if mine.location.is_none() {
            Pick::Location(*state.available_locations.iter().next().unwrap())
        } else {
            Pick::Strategy(*state.available_strategies.iter().next().unwrap())
        };
        make_pick(&mut state, &who, pick).unwrap();
    }

    assert_eq!(state.phase, Phase::Complete);
    assert!(state.picks.values().all(|p| p.is_complete()));
    assert_eq!(state.taken_factions().len(), 3);
}

/// Greedy snake draft: faction first, then location, then strategy, always
/// the lowest legal value. Panics if a turn holder has no legal pick.
fn pick_greedily(state: &mut DraftState) {
    let limit = 3 * state.player_count();
    let mut picks = 0;
    while state.phase == Phase::SnakeDraft {
        picks += 1;
        assert!(picks <= limit, "every player needs exactly three picks");
        let who = state.to_act().cloned().unwrap();
        let mine = state.picks[&who];
        let pick = if mine.faction.is_none() {
            let f = state.pickable_factions().into_iter().next();
            Pick::Faction(f.unwrap_or_else(|| panic!("{who} has no pickable faction")))
        } else if mine.location.is_none() {
            Pick::Location(*state.available_locations.iter().next().unwrap())
        } else {
            Pick::Strategy(*state.available_strategies.iter().next().unwrap())
        };
        make_pick(state, &who, pick).unwrap();
    }
}

/// Seven players overlap on faction 1: both p1 and p7 make it their
/// primary, so the final pool holds six factions for seven players.
#[test]
fn seven_players_with_a_short_pool_still_complete() {
    let names = ["p1", "p2", "p3", "p4", "p5", "p6", "p7"];
    let hands = [
        [1, 2, 3, 4],
        [5, 6, 7, 8],
        [9, 10, 11, 12],
        [13, 14, 15, 16],
        [17, 18, 19, 20],
        [21, 22, 23, 24],
        [25, 1, 5, 9],
    ];
    let mut state = selecting(&names, &hands);
    let mut r = rng(11);

    for (name, hand) in names.iter().zip(hands) {
        let (primary, optional) = if *name == "p7" {
            (hand[1], hand[0])
        } else {
            (hand[0], hand[1])
        };
        submit_selection(&mut state, &pid(name), fid(primary), fid(optional), &mut r).unwrap();
    }
    assert_eq!(state.phase, Phase::Voting);
    assert_eq!(state.final_pool.len(), 6);
    assert_eq!(state.optional_pool.len(), 7);

    // Everyone backs a different optional: nothing reaches quorum.
    while state.phase == Phase::Voting {
        let who = state.to_act().cloned().unwrap();
        let target = state
            .optional_pool
            .iter()
            .copied()
            .find(|f| !state.votes.contains_key(f))
            .unwrap();
        cast_vote(&mut state, &who, target).unwrap();
    }
    assert_eq!(state.phase, Phase::SnakeDraft);
    assert_eq!(state.final_pool.len(), 6);

    pick_greedily(&mut state);

    assert_eq!(state.phase, Phase::Complete);
    assert!(state.picks.values().all(|p| p.is_complete()));
    // Six distinct factions cover seven players: exactly one is shared.
    assert_eq!(state.taken_factions().len(), 6);
}

#[test]
fn exclusivity_holds_while_the_pool_can_cover_everyone() {
    let names = ["a", "b", "c"];
    let mut state = lobby(&names);
    let mut r = rng(5);
    begin(&mut state, test_map(), &mut r).unwrap();
    for name in names {
        let hand = state.assigned[&pid(name)];
        submit_selection(&mut state, &pid(name), hand[0], hand[1], &mut r).unwrap();
    }
    while state.phase == Phase::Voting {
        let who = state.to_act().cloned().unwrap();
        let target = *state.optional_pool.iter().next().unwrap();
        cast_vote(&mut state, &who, target).unwrap();
    }

    pick_greedily(&mut state);

    assert_eq!(state.phase, Phase::Complete);
    assert_eq!(state.taken_factions().len(), 3);
}
