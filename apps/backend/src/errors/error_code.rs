//! Error codes for the drafter API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in problem-details responses.

use core::fmt;

use crate::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Draft rule rejections
    PhaseMismatch,
    NotEnrolled,
    AlreadyActed,
    OutOfTurn,
    FactionNotAssigned,
    SameFaction,
    NotInOptionalPool,
    AlreadyPromoted,
    NotInFinalPool,
    LocationUnavailable,
    StrategyUnavailable,
    CategoryAlreadyPicked,
    InsufficientPlayers,
    UnknownFaction,
    InvalidCategory,
    /// General validation error
    ValidationError,

    // Request shape
    InvalidChannel,
    InvalidPlayer,
    /// `X-Player-Id` header absent
    MissingPlayer,
    BadRequest,

    // Resource Not Found
    SessionNotFound,
    SnapshotNotFound,

    // Conflicts
    SessionActive,
    AlreadyJoined,
    FactionTaken,
    DraftComplete,

    // System Errors
    StorageUnavailable,
    MapProviderUnavailable,
    DataCorruption,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotEnrolled => "NOT_ENROLLED",
            Self::AlreadyActed => "ALREADY_ACTED",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::FactionNotAssigned => "FACTION_NOT_ASSIGNED",
            Self::SameFaction => "SAME_FACTION",
            Self::NotInOptionalPool => "NOT_IN_OPTIONAL_POOL",
            Self::AlreadyPromoted => "ALREADY_PROMOTED",
            Self::NotInFinalPool => "NOT_IN_FINAL_POOL",
            Self::LocationUnavailable => "LOCATION_UNAVAILABLE",
            Self::StrategyUnavailable => "STRATEGY_UNAVAILABLE",
            Self::CategoryAlreadyPicked => "CATEGORY_ALREADY_PICKED",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::UnknownFaction => "UNKNOWN_FACTION",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::InvalidChannel => "INVALID_CHANNEL",
            Self::InvalidPlayer => "INVALID_PLAYER",
            Self::MissingPlayer => "MISSING_PLAYER",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SnapshotNotFound => "SNAPSHOT_NOT_FOUND",

            Self::SessionActive => "SESSION_ACTIVE",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::FactionTaken => "FACTION_TAKEN",
            Self::DraftComplete => "DRAFT_COMPLETE",

            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::MapProviderUnavailable => "MAP_PROVIDER_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::PhaseMismatch => Self::PhaseMismatch,
            ValidationKind::NotEnrolled => Self::NotEnrolled,
            ValidationKind::AlreadyActed => Self::AlreadyActed,
            ValidationKind::OutOfTurn => Self::OutOfTurn,
            ValidationKind::FactionNotAssigned => Self::FactionNotAssigned,
            ValidationKind::SameFaction => Self::SameFaction,
            ValidationKind::NotInOptionalPool => Self::NotInOptionalPool,
            ValidationKind::AlreadyPromoted => Self::AlreadyPromoted,
            ValidationKind::NotInFinalPool => Self::NotInFinalPool,
            ValidationKind::LocationUnavailable => Self::LocationUnavailable,
            ValidationKind::StrategyUnavailable => Self::StrategyUnavailable,
            ValidationKind::CategoryAlreadyPicked => Self::CategoryAlreadyPicked,
            ValidationKind::InsufficientPlayers => Self::InsufficientPlayers,
            ValidationKind::UnknownFaction => Self::UnknownFaction,
            ValidationKind::InvalidChannel => Self::InvalidChannel,
            ValidationKind::InvalidPlayer => Self::InvalidPlayer,
            ValidationKind::InvalidCategory => Self::InvalidCategory,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&ConflictKind> for ErrorCode {
    fn from(kind: &ConflictKind) -> Self {
        match kind {
            ConflictKind::SessionActive => Self::SessionActive,
            ConflictKind::AlreadyJoined => Self::AlreadyJoined,
            ConflictKind::FactionTaken => Self::FactionTaken,
            ConflictKind::DraftComplete => Self::DraftComplete,
        }
    }
}

impl From<&NotFoundKind> for ErrorCode {
    fn from(kind: &NotFoundKind) -> Self {
        match kind {
            NotFoundKind::Session => Self::SessionNotFound,
            NotFoundKind::Snapshot => Self::SnapshotNotFound,
        }
    }
}

impl From<&InfraErrorKind> for ErrorCode {
    fn from(kind: &InfraErrorKind) -> Self {
        match kind {
            InfraErrorKind::Storage => Self::StorageUnavailable,
            InfraErrorKind::MapProvider => Self::MapProviderUnavailable,
            InfraErrorKind::DataCorruption => Self::DataCorruption,
        }
    }
}
