use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::FactionId;
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::snake::TurnCursor;
use crate::errors::domain::{DomainError, ValidationKind};

pub const FACTIONS_PER_PLAYER: usize = 4;

/// Overall draft progression. Ordering follows the lifecycle, so
/// `phase_a < phase_b` means `phase_a` comes first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Session open, players joining.
    Idle,
    /// Factions dealt; each player names a primary and an optional.
    Selecting,
    /// Turn-gated quorum voting over the optional pool.
    Voting,
    /// Snake-ordered picks of faction, location and strategy.
    SnakeDraft,
    /// Every player holds all three picks.
    Complete,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selecting => "selecting",
            Phase::Voting => "voting",
            Phase::SnakeDraft => "snake_draft",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player's submission during Selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub primary: FactionId,
    pub optional: FactionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickCategory {
    Faction,
    Location,
    Strategy,
}

impl PickCategory {
    pub const ALL: [PickCategory; 3] = [
        PickCategory::Faction,
        PickCategory::Location,
        PickCategory::Strategy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PickCategory::Faction => "faction",
            PickCategory::Location => "location",
            PickCategory::Strategy => "strategy",
        }
    }
}

impl fmt::Display for PickCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faction" => Ok(PickCategory::Faction),
            "location" => Ok(PickCategory::Location),
            "strategy" => Ok(PickCategory::Strategy),
            other => Err(DomainError::validation(
                ValidationKind::InvalidCategory,
                format!("Unknown pick category {other:?}; expected faction, location or strategy"),
            )),
        }
    }
}

/// One snake-draft action: a category together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Faction(FactionId),
    Location(u32),
    Strategy(u32),
}

impl Pick {
    /// Build a pick from transport-level parts. Faction values are checked
    /// against the catalog; location and strategy are checked later against
    /// the session's available sets.
    pub fn from_parts(category: PickCategory, value: u32) -> Result<Self, DomainError> {
        Ok(match category {
            PickCategory::Faction => Pick::Faction(FactionId::try_new(value)?),
            PickCategory::Location => Pick::Location(value),
            PickCategory::Strategy => Pick::Strategy(value),
        })
    }

    pub const fn category(self) -> PickCategory {
        match self {
            Pick::Faction(_) => PickCategory::Faction,
            Pick::Location(_) => PickCategory::Location,
            Pick::Strategy(_) => PickCategory::Strategy,
        }
    }
}

/// Fixed-shape per-player picks; each category is filled at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Picks {
    pub faction: Option<FactionId>,
    pub location: Option<u32>,
    pub strategy: Option<u32>,
}

impl Picks {
    pub const fn is_filled(&self, category: PickCategory) -> bool {
        match category {
            PickCategory::Faction => self.faction.is_some(),
            PickCategory::Location => self.location.is_some(),
            PickCategory::Strategy => self.strategy.is_some(),
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.faction.is_some() && self.location.is_some() && self.strategy.is_some()
    }
}

/// Opaque map reference plus the seed it was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRef {
    pub seed: u32,
    pub url: String,
}

/// Entire draft container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    pub channel: ChannelId,
    pub phase: Phase,
    /// Join order; frozen once the phase leaves Idle.
    pub players: Vec<PlayerId>,
    pub assigned: BTreeMap<PlayerId, [FactionId; FACTIONS_PER_PLAYER]>,
    pub selections: BTreeMap<PlayerId, Selection>,
    /// Proposed factions awaiting quorum. Disjoint from `final_pool`.
    pub optional_pool: BTreeSet<FactionId>,
    pub final_pool: BTreeSet<FactionId>,
    pub votes: BTreeMap<FactionId, BTreeSet<PlayerId>>,
    /// Fixed at Selecting -> Voting and reused through SnakeDraft.
    pub draft_order: Vec<PlayerId>,
    pub cursor: TurnCursor,
    pub picks: BTreeMap<PlayerId, Picks>,
    pub available_locations: BTreeSet<u32>,
    pub available_strategies: BTreeSet<u32>,
    pub map: Option<MapRef>,
}

impl DraftState {
    pub fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            phase: Phase::Idle,
            players: Vec::new(),
            assigned: BTreeMap::new(),
            selections: BTreeMap::new(),
            optional_pool: BTreeSet::new(),
            final_pool: BTreeSet::new(),
            votes: BTreeMap::new(),
            draft_order: Vec::new(),
            cursor: TurnCursor::start(),
            picks: BTreeMap::new(),
            available_locations: BTreeSet::new(),
            available_strategies: BTreeSet::new(),
            map: None,
        }
    }

    pub fn is_enrolled(&self, who: &PlayerId) -> bool {
        self.players.contains(who)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player holding the turn, only meaningful in turn-gated phases.
    pub fn to_act(&self) -> Option<&PlayerId> {
        match self.phase {
            Phase::Voting | Phase::SnakeDraft => self.draft_order.get(self.cursor.pointer),
            _ => None,
        }
    }

    pub fn assigned_to(&self, who: &PlayerId) -> Option<&[FactionId; FACTIONS_PER_PLAYER]> {
        self.assigned.get(who)
    }

    /// Factions already claimed in the snake draft.
    pub fn taken_factions(&self) -> BTreeSet<FactionId> {
        self.picks.values().filter_map(|p| p.faction).collect()
    }

    /// Players who have not picked a faction yet.
    pub fn missing_faction_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !self.picks.get(*p).is_some_and(|picks| picks.faction.is_some()))
            .count()
    }

    /// Factions that may be picked right now.
    ///
    /// Picks are exclusive while the untaken part of the final pool can
    /// still cover every player missing a faction. Once it cannot, the whole
    /// final pool is open again so the draft can always complete.
    pub fn pickable_factions(&self) -> BTreeSet<FactionId> {
        if self.faction_shortage() {
            return self.final_pool.clone();
        }
        let taken = self.taken_factions();
        self.final_pool.difference(&taken).copied().collect()
    }

    /// True when the final pool is too small for exclusive picks.
    pub fn faction_shortage(&self) -> bool {
        self.final_pool.difference(&self.taken_factions()).count() < self.missing_faction_count()
    }
}

pub fn require_phase(state: &DraftState, expected: Phase, action: &str) -> Result<(), DomainError> {
    if state.phase != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "Cannot {action} during {}; expected {}",
                state.phase, expected
            ),
        ));
    }
    Ok(())
}

pub fn require_enrolled(state: &DraftState, who: &PlayerId) -> Result<(), DomainError> {
    if !state.is_enrolled(who) {
        return Err(DomainError::validation(
            ValidationKind::NotEnrolled,
            format!("{who} has not joined this draft"),
        ));
    }
    Ok(())
}

pub fn require_turn(state: &DraftState, who: &PlayerId) -> Result<(), DomainError> {
    match state.to_act() {
        Some(current) if current == who => Ok(()),
        Some(current) => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Out of turn: waiting on {current}"),
        )),
        None => Err(DomainError::validation_other(
            "Invariant violated: turn pointer outside draft order",
        )),
    }
}
