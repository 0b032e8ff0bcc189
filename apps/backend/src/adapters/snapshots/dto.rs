//! Serialized form of a draft session.
//!
//! Sets are stored as sorted vectors so files diff cleanly. Converting back
//! into a `DraftState` re-checks the state invariants; any violation is
//! reported as data corruption rather than a player rejection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::FactionId;
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::snake::{Direction, TurnCursor};
use crate::domain::state::{DraftState, MapRef, Phase, Picks, Selection, FACTIONS_PER_PLAYER};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub primary: u32,
    pub optional: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicksRecord {
    pub faction: Option<u32>,
    pub location: Option<u32>,
    pub strategy: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub schema_version: u32,
    pub channel: String,
    pub phase: Phase,
    pub players: Vec<String>,
    pub assigned: BTreeMap<String, Vec<u32>>,
    pub selections: BTreeMap<String, SelectionRecord>,
    pub optional_pool: Vec<u32>,
    pub final_pool: Vec<u32>,
    pub votes: BTreeMap<u32, Vec<String>>,
    pub draft_order: Vec<String>,
    pub turn_pointer: usize,
    pub direction: Direction,
    pub round: u32,
    pub picks: BTreeMap<String, PicksRecord>,
    pub available_locations: Vec<u32>,
    pub available_strategies: Vec<u32>,
    pub map: Option<MapRef>,
}

fn faction_index(f: &FactionId) -> u32 {
    u32::from(f.index())
}

fn player_name(p: &PlayerId) -> String {
    p.as_str().to_string()
}

impl From<&DraftState> for DraftRecord {
    fn from(state: &DraftState) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            channel: state.channel.as_str().to_string(),
            phase: state.phase,
            players: state.players.iter().map(player_name).collect(),
            assigned: state
                .assigned
                .iter()
                .map(|(p, hand)| (player_name(p), hand.iter().map(faction_index).collect()))
                .collect(),
            selections: state
                .selections
                .iter()
                .map(|(p, s)| {
                    (
                        player_name(p),
                        SelectionRecord {
                            primary: faction_index(&s.primary),
                            optional: faction_index(&s.optional),
                        },
                    )
                })
                .collect(),
            optional_pool: state.optional_pool.iter().map(faction_index).collect(),
            final_pool: state.final_pool.iter().map(faction_index).collect(),
            votes: state
                .votes
                .iter()
                .map(|(f, voters)| (faction_index(f), voters.iter().map(player_name).collect()))
                .collect(),
            draft_order: state.draft_order.iter().map(player_name).collect(),
            turn_pointer: state.cursor.pointer,
            direction: state.cursor.direction,
            round: state.cursor.round,
            picks: state
                .picks
                .iter()
                .map(|(p, picks)| {
                    (
                        player_name(p),
                        PicksRecord {
                            faction: picks.faction.as_ref().map(faction_index),
                            location: picks.location,
                            strategy: picks.strategy,
                        },
                    )
                })
                .collect(),
            available_locations: state.available_locations.iter().copied().collect(),
            available_strategies: state.available_strategies.iter().copied().collect(),
            map: state.map.clone(),
        }
    }
}

fn corrupt(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

fn parse_player(raw: &str) -> Result<PlayerId, DomainError> {
    PlayerId::parse(raw).map_err(|e| corrupt(format!("bad player id in snapshot: {e}")))
}

fn parse_faction(raw: u32) -> Result<FactionId, DomainError> {
    FactionId::try_new(raw).map_err(|e| corrupt(format!("bad faction in snapshot: {e}")))
}

fn unique_set<T: Ord + Copy>(values: &[T], what: &str) -> Result<BTreeSet<T>, DomainError> {
    let set: BTreeSet<T> = values.iter().copied().collect();
    if set.len() != values.len() {
        return Err(corrupt(format!("{what} contains duplicates")));
    }
    Ok(set)
}

fn factions(values: &[u32], what: &str) -> Result<BTreeSet<FactionId>, DomainError> {
    let raw = unique_set(values, what)?;
    raw.into_iter().map(parse_faction).collect()
}

impl TryFrom<DraftRecord> for DraftState {
    type Error = DomainError;

    fn try_from(record: DraftRecord) -> Result<Self, Self::Error> {
        if record.schema_version != SCHEMA_VERSION {
            return Err(corrupt(format!(
                "unsupported snapshot schema {} (expected {SCHEMA_VERSION})",
                record.schema_version
            )));
        }

        let channel = ChannelId::parse(record.channel)
            .map_err(|e| corrupt(format!("bad channel in snapshot: {e}")))?;

        let players = record
            .players
            .iter()
            .map(|p| parse_player(p))
            .collect::<Result<Vec<_>, _>>()?;
        let roster: BTreeSet<PlayerId> = players.iter().cloned().collect();
        if roster.len() != players.len() {
            return Err(corrupt("players contains duplicates"));
        }
        let known = |p: &PlayerId, what: &str| -> Result<(), DomainError> {
            if roster.contains(p) {
                Ok(())
            } else {
                Err(corrupt(format!("{what} references unknown player {p}")))
            }
        };

        let mut assigned = BTreeMap::new();
        for (raw, hand) in &record.assigned {
            let player = parse_player(raw)?;
            known(&player, "assigned")?;
            factions(hand, "assigned hand")?;
            let hand: [FactionId; FACTIONS_PER_PLAYER] = hand
                .iter()
                .map(|&f| parse_faction(f))
                .collect::<Result<Vec<_>, _>>()?
                .try_into()
                .map_err(|_| corrupt(format!("{player} does not hold exactly four factions")))?;
            assigned.insert(player, hand);
        }
        if record.phase > Phase::Idle && assigned.len() != players.len() {
            return Err(corrupt("not every player has an assignment"));
        }

        let mut selections = BTreeMap::new();
        for (raw, s) in &record.selections {
            let player = parse_player(raw)?;
            known(&player, "selections")?;
            selections.insert(
                player,
                Selection {
                    primary: parse_faction(s.primary)?,
                    optional: parse_faction(s.optional)?,
                },
            );
        }

        let optional_pool = factions(&record.optional_pool, "optional_pool")?;
        let final_pool = factions(&record.final_pool, "final_pool")?;
        if !optional_pool.is_disjoint(&final_pool) {
            return Err(corrupt("optional_pool and final_pool overlap"));
        }

        let mut votes = BTreeMap::new();
        for (faction, voters) in &record.votes {
            let mut set = BTreeSet::new();
            for raw in voters {
                let voter = parse_player(raw)?;
                known(&voter, "votes")?;
                set.insert(voter);
            }
            votes.insert(parse_faction(*faction)?, set);
        }

        let draft_order = record
            .draft_order
            .iter()
            .map(|p| parse_player(p))
            .collect::<Result<Vec<_>, _>>()?;
        if record.phase >= Phase::Voting {
            let ordered: BTreeSet<PlayerId> = draft_order.iter().cloned().collect();
            if ordered != roster || draft_order.len() != players.len() {
                return Err(corrupt("draft_order is not a permutation of players"));
            }
            if record.turn_pointer >= draft_order.len() {
                return Err(corrupt(format!(
                    "turn_pointer {} outside draft order of {}",
                    record.turn_pointer,
                    draft_order.len()
                )));
            }
        } else if !draft_order.is_empty() {
            return Err(corrupt("draft_order set before voting"));
        }
        if record.round == 0 {
            return Err(corrupt("round must be at least 1"));
        }

        let slots = u32::try_from(players.len()).map_err(|_| corrupt("too many players"))?;
        let available_locations = unique_set(&record.available_locations, "available_locations")?;
        let available_strategies =
            unique_set(&record.available_strategies, "available_strategies")?;
        if available_locations
            .iter()
            .chain(available_strategies.iter())
            .any(|v| !(1..=slots).contains(v))
        {
            return Err(corrupt("available values outside 1..=player count"));
        }

        let mut picks = BTreeMap::new();
        for (raw, p) in &record.picks {
            let player = parse_player(raw)?;
            known(&player, "picks")?;
            let faction = p.faction.map(parse_faction).transpose()?;
            if let Some(f) = faction {
                if !final_pool.contains(&f) {
                    return Err(corrupt(format!("{player} holds {f} outside final_pool")));
                }
            }
            if p.location.is_some_and(|l| available_locations.contains(&l))
                || p.strategy.is_some_and(|s| available_strategies.contains(&s))
            {
                return Err(corrupt(format!("{player} holds a value still marked available")));
            }
            picks.insert(
                player,
                Picks {
                    faction,
                    location: p.location,
                    strategy: p.strategy,
                },
            );
        }

        let held: Vec<FactionId> = picks.values().filter_map(|p| p.faction).collect();
        let taken: BTreeSet<FactionId> = held.iter().copied().collect();
        if taken.len() != held.len() {
            let untaken = final_pool.difference(&taken).count();
            let missing = players.len().saturating_sub(held.len());
            if untaken > missing {
                return Err(corrupt(
                    "a faction is shared although final_pool could cover every player",
                ));
            }
        }

        Ok(DraftState {
            channel,
            phase: record.phase,
            players,
            assigned,
            selections,
            optional_pool,
            final_pool,
            votes,
            draft_order,
            cursor: TurnCursor {
                pointer: record.turn_pointer,
                direction: record.direction,
                round: record.round,
            },
            picks,
            available_locations,
            available_strategies,
            map: record.map,
        })
    }
}
