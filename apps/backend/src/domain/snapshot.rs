//! Public per-viewer projection of a draft, used as every action's success
//! payload.

use serde::Serialize;

use crate::domain::catalog::{FactionEntry, FactionId};
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::lobby::MIN_PLAYERS;
use crate::domain::snake::{pick_schedule, Direction};
use crate::domain::state::{DraftState, MapRef, Phase};
use crate::domain::voting::QUORUM;

/// Top-level view combining the session header and phase-specific data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DraftView {
    pub channel: ChannelId,
    pub players: Vec<PlayerId>,
    pub map: Option<MapRef>,
    pub state: PhaseView,
}

/// Adjacently tagged union of phase-specific views.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum PhaseView {
    Idle(LobbyView),
    Selecting(SelectingView),
    Voting(VotingView),
    SnakeDraft(SnakeDraftView),
    Complete(CompleteView),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LobbyView {
    pub min_players: usize,
    pub can_begin: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectingView {
    /// The viewer's own four factions; `None` for spectators.
    pub your_factions: Option<Vec<FactionEntry>>,
    pub submitted: Vec<PlayerId>,
    pub waiting_on: Vec<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VoteTally {
    pub faction: FactionEntry,
    pub votes: usize,
    pub voters: Vec<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VotingView {
    pub quorum: usize,
    pub draft_order: Vec<PlayerId>,
    pub to_act: Option<PlayerId>,
    pub final_pool: Vec<FactionEntry>,
    pub optional_pool: Vec<VoteTally>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerPicksView {
    pub player: PlayerId,
    pub faction: Option<FactionEntry>,
    pub location: Option<u32>,
    pub strategy: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnakeDraftView {
    pub draft_order: Vec<PlayerId>,
    pub to_act: Option<PlayerId>,
    pub round: u32,
    pub direction: Direction,
    /// Next few players to act, starting with the current one.
    pub upcoming: Vec<PlayerId>,
    pub available_factions: Vec<FactionEntry>,
    pub available_locations: Vec<u32>,
    pub available_strategies: Vec<u32>,
    pub picks: Vec<PlayerPicksView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompleteView {
    pub picks: Vec<PlayerPicksView>,
}

/// Project `state` for `viewer` (who may be a non-participant).
pub fn draft_view(state: &DraftState, viewer: Option<&PlayerId>) -> DraftView {
    let phase = match state.phase {
        Phase::Idle => PhaseView::Idle(LobbyView {
            min_players: MIN_PLAYERS,
            can_begin: state.player_count() >= MIN_PLAYERS,
        }),
        Phase::Selecting => {
            let (submitted, waiting_on): (Vec<PlayerId>, Vec<PlayerId>) = state
                .players
                .iter()
                .cloned()
                .partition(|p| state.selections.contains_key(p));
            PhaseView::Selecting(SelectingView {
                your_factions: viewer
                    .and_then(|v| state.assigned_to(v))
                    .map(|hand| hand.iter().map(|f| f.entry()).collect()),
                submitted,
                waiting_on,
            })
        }
        Phase::Voting => PhaseView::Voting(VotingView {
            quorum: QUORUM,
            draft_order: state.draft_order.clone(),
            to_act: state.to_act().cloned(),
            final_pool: state.final_pool.iter().map(|f| f.entry()).collect(),
            optional_pool: state
                .optional_pool
                .iter()
                .map(|f| {
                    let voters: Vec<PlayerId> = state
                        .votes
                        .get(f)
                        .map(|v| v.iter().cloned().collect())
                        .unwrap_or_default();
                    VoteTally {
                        faction: f.entry(),
                        votes: voters.len(),
                        voters,
                    }
                })
                .collect(),
        }),
        Phase::SnakeDraft => {
            let len = state.draft_order.len();
            PhaseView::SnakeDraft(SnakeDraftView {
                draft_order: state.draft_order.clone(),
                to_act: state.to_act().cloned(),
                round: state.cursor.round,
                direction: state.cursor.direction,
                upcoming: pick_schedule(state.cursor, len, len)
                    .into_iter()
                    .filter_map(|i| state.draft_order.get(i).cloned())
                    .collect(),
                available_factions: state
                    .pickable_factions()
                    .into_iter()
                    .map(FactionId::entry)
                    .collect(),
                available_locations: state.available_locations.iter().copied().collect(),
                available_strategies: state.available_strategies.iter().copied().collect(),
                picks: picks_view(state),
            })
        }
        Phase::Complete => PhaseView::Complete(CompleteView {
            picks: picks_view(state),
        }),
    };

    DraftView {
        channel: state.channel.clone(),
        players: state.players.clone(),
        map: state.map.clone(),
        state: phase,
    }
}

fn picks_view(state: &DraftState) -> Vec<PlayerPicksView> {
    let order = if state.draft_order.is_empty() {
        &state.players
    } else {
        &state.draft_order
    };
    order
        .iter()
        .map(|p| {
            let picks = state.picks.get(p).copied().unwrap_or_default();
            PlayerPicksView {
                player: p.clone(),
                faction: picks.faction.map(|f| f.entry()),
                location: picks.location,
                strategy: picks.strategy,
            }
        })
        .collect()
}
