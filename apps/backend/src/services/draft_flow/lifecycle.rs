//! Session lifecycle: open, enroll, begin, map, inspect and restore.

use tracing::{debug, info};

use crate::domain::draft_transition::{DraftLifecycleView, DraftTransition};
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::lobby;
use crate::domain::snapshot::draft_view;
use crate::domain::state::{DraftState, MapRef, Phase};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::snapshots::load_draft;
use crate::services::draft_flow::{ActionOutcome, DraftFlowService};

impl DraftFlowService {
    /// Open a new draft in `channel`.
    pub async fn start_session(&self, channel: &ChannelId) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, "Starting draft session");

        let handle = self.registry.create(DraftState::new(channel.clone()))?;
        let state = handle.lock().await;
        self.persist(&state).await;

        info!(channel = %channel, "Draft session opened");
        Ok(ActionOutcome {
            view: draft_view(&state, None),
            transitions: vec![DraftTransition::SessionOpened],
        })
    }

    pub async fn join(
        &self,
        channel: &ChannelId,
        player: &PlayerId,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, player = %player, "Join requested");

        self.run_mutation(channel, Some(player), |state, _| {
            lobby::join(state, player.clone())?;
            Ok(vec![DraftTransition::PlayerJoined {
                player: player.clone(),
            }])
        })
        .await
    }

    /// Idle -> Selecting: deal factions and generate the map.
    pub async fn begin(
        &self,
        channel: &ChannelId,
        viewer: Option<&PlayerId>,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, "Begin requested");

        let handle = self.registry.require(channel)?;
        let mut guard = handle.lock().await;
        lobby::ensure_can_begin(&guard)?;

        let map = self.generate_map(guard.player_count()).await?;

        let mut working = guard.clone();
        let before = DraftLifecycleView::of(&working);
        {
            let mut rng = self.rng.lock();
            lobby::begin(&mut working, map, &mut *rng)?;
        }

        Ok(self
            .commit(&handle, &mut guard, working, before, Vec::new(), viewer)
            .await)
    }

    /// Redraw the map seed and reference. Only enrolled players, only while
    /// selecting.
    pub async fn regenerate_map(
        &self,
        channel: &ChannelId,
        player: &PlayerId,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, player = %player, "Map regeneration requested");

        let handle = self.registry.require(channel)?;
        let mut guard = handle.lock().await;
        lobby::ensure_can_regenerate_map(&guard, player)?;

        let map = self.generate_map(guard.player_count()).await?;
        let seed = map.seed;

        let mut working = guard.clone();
        let before = DraftLifecycleView::of(&working);
        lobby::replace_map(&mut working, map);

        Ok(self
            .commit(
                &handle,
                &mut guard,
                working,
                before,
                vec![DraftTransition::MapRegenerated { seed }],
                Some(player),
            )
            .await)
    }

    /// Read-only, per-viewer projection of the running draft.
    pub async fn list_state(
        &self,
        channel: &ChannelId,
        viewer: Option<&PlayerId>,
    ) -> Result<ActionOutcome, AppError> {
        let handle = self.registry.require(channel)?;
        let state = handle.lock().await;
        Ok(ActionOutcome {
            view: draft_view(&state, viewer),
            transitions: Vec::new(),
        })
    }

    /// Restore a draft from its snapshot into the registry.
    pub async fn load_session(
        &self,
        channel: &ChannelId,
        viewer: Option<&PlayerId>,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, "Loading draft snapshot");

        if self.registry.contains(channel) {
            return Err(DomainError::conflict(
                ConflictKind::SessionActive,
                format!("A draft is already running in {channel}"),
            )
            .into());
        }

        let state = load_draft(self.store.as_ref(), channel)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Snapshot,
                    format!("No saved draft for {channel}"),
                )
            })?;
        if state.phase == Phase::Complete {
            return Err(DomainError::conflict(
                ConflictKind::DraftComplete,
                format!("The saved draft for {channel} is already complete"),
            )
            .into());
        }

        let handle = self.registry.create(state)?;
        let state = handle.lock().await;

        info!(channel = %channel, phase = %state.phase, "Draft session restored");
        Ok(ActionOutcome {
            view: draft_view(&state, viewer),
            transitions: vec![DraftTransition::SessionLoaded],
        })
    }

    async fn generate_map(&self, players: usize) -> Result<MapRef, DomainError> {
        let seed = lobby::draw_map_seed(&mut *self.rng.lock());
        self.maps.generate(players, seed).await
    }
}
