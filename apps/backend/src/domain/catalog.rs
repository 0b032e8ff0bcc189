//! Static faction catalog.
//!
//! Indices are 1-based and stable; they are what players type and what
//! snapshots store, so the order below must never change.

use std::fmt;

use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

pub const CATALOG_SIZE: u8 = 25;

const FACTION_NAMES: [&str; CATALOG_SIZE as usize] = [
    // Base game
    "The Arborec",
    "The Barony of Letnev",
    "The Clan of Saar",
    "The Embers of Muaat",
    "The Emirates of Hacan",
    "The Federation of Sol",
    "The Ghosts of Creuss",
    "The L1Z1X Mindnet",
    "The Mentak Coalition",
    "The Naalu Collective",
    "The Nekro Virus",
    "The Sardakk N'orr",
    "The Universities of Jol-Nar",
    "The Winnu",
    "The Xxcha Kingdom",
    "The Yin Brotherhood",
    "The Yssaril Tribes",
    // Prophecy of Kings
    "The Argent Flight",
    "The Empyrean",
    "The Mahact Gene-Sorcerers",
    "The Naaz-Rokha Alliance",
    "The Nomad",
    "The Titans of Ul",
    "The Vuil'Raith Cabal",
    // Codex
    "The Council Keleres",
];

/// Catalog index of a faction (1..=25).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FactionId(u8);

impl FactionId {
    pub fn try_new(index: u32) -> Result<Self, DomainError> {
        match u8::try_from(index) {
            Ok(i) if (1..=CATALOG_SIZE).contains(&i) => Ok(Self(i)),
            _ => Err(DomainError::validation(
                ValidationKind::UnknownFaction,
                format!("Faction index must be in 1..={CATALOG_SIZE}, got {index}"),
            )),
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        FACTION_NAMES[usize::from(self.0 - 1)]
    }

    pub fn entry(self) -> FactionEntry {
        FactionEntry {
            index: self.0,
            name: self.name(),
        }
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.name())
    }
}

/// Display pair used in every outbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactionEntry {
    pub index: u8,
    pub name: &'static str,
}

/// Every faction in catalog order.
pub fn all_factions() -> impl Iterator<Item = FactionId> {
    (1..=CATALOG_SIZE).map(FactionId)
}

pub fn catalog() -> Vec<FactionEntry> {
    all_factions().map(FactionId::entry).collect()
}
