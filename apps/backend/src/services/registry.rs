//! Active draft sessions, at most one per channel.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::ids::ChannelId;
use crate::domain::state::DraftState;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

pub type SessionHandle = Arc<Mutex<DraftState>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<ChannelId, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state` under its channel. Fails if a session is already
    /// active there.
    pub fn create(&self, state: DraftState) -> Result<SessionHandle, DomainError> {
        match self.sessions.entry(state.channel.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionActive,
                format!("A draft is already running in {}", state.channel),
            )),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(state));
                slot.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    pub fn get(&self, channel: &ChannelId) -> Option<SessionHandle> {
        self.sessions.get(channel).map(|h| h.value().clone())
    }

    pub fn require(&self, channel: &ChannelId) -> Result<SessionHandle, DomainError> {
        self.get(channel).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Session,
                format!("No draft is running in {channel}"),
            )
        })
    }

    /// Drop the session for `channel`, but only if it is still `handle`.
    pub fn remove(&self, channel: &ChannelId, handle: &SessionHandle) -> bool {
        self.sessions
            .remove_if(channel, |_, current| Arc::ptr_eq(current, handle))
            .is_some()
    }

    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.sessions.contains_key(channel)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
