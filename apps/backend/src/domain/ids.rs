//! Channel and player identities.
//!
//! Both are opaque strings supplied by the transport; the draft never
//! authenticates them, it only checks that they are well-formed.

use std::fmt;

use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_CHANNEL_LEN: usize = 64;
pub const MAX_PLAYER_LEN: usize = 128;

/// Channel a draft session is scoped to. Restricted to `[A-Za-z0-9_-]` so it
/// can be used verbatim as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_CHANNEL_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(DomainError::validation(
                ValidationKind::InvalidChannel,
                format!(
                    "Channel id must be 1..={MAX_CHANNEL_LEN} characters of [A-Za-z0-9_-], got {raw:?}"
                ),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > MAX_PLAYER_LEN
            || trimmed.chars().any(char::is_control)
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayer,
                format!("Player id must be 1..={MAX_PLAYER_LEN} printable bytes"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
