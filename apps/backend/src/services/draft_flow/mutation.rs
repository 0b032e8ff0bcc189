use tokio::sync::MutexGuard;
use tracing::{debug, info, warn};

use crate::domain::draft_transition::{derive_draft_transitions, DraftLifecycleView, DraftTransition};
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::snapshot::draft_view;
use crate::domain::state::{DraftState, Phase};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::snapshots::save_draft;
use crate::services::draft_flow::{ActionOutcome, DraftFlowService};
use crate::services::registry::SessionHandle;

impl DraftFlowService {
    /// Run a synchronous mutation against a working copy of the channel's
    /// draft. The copy replaces the live state only if the mutation succeeds.
    ///
    /// The closure returns explicit transitions; edge-triggered ones are
    /// derived from the before/after lifecycle views.
    pub(super) async fn run_mutation<F>(
        &self,
        channel: &ChannelId,
        viewer: Option<&PlayerId>,
        mutation: F,
    ) -> Result<ActionOutcome, AppError>
    where
        F: FnOnce(&mut DraftState, &mut rand::rngs::StdRng) -> Result<Vec<DraftTransition>, DomainError>,
    {
        let handle = self.registry.require(channel)?;
        let mut guard = handle.lock().await;

        let mut working = guard.clone();
        let before = DraftLifecycleView::of(&working);
        let result = {
            let mut rng = self.rng.lock();
            mutation(&mut working, &mut *rng)
        };
        let explicit = match result {
            Ok(explicit) => explicit,
            Err(e) if e.is_rejection() => {
                debug!(channel = %channel, error = %e, "Draft action rejected");
                return Err(e.into());
            }
            Err(e) => {
                warn!(channel = %channel, error = %e, "Draft action failed");
                return Err(e.into());
            }
        };

        Ok(self
            .commit(&handle, &mut guard, working, before, explicit, viewer)
            .await)
    }

    /// Install `working` as the live state, persist it and report the
    /// resulting transitions. A completed draft leaves the registry.
    pub(super) async fn commit(
        &self,
        handle: &SessionHandle,
        guard: &mut MutexGuard<'_, DraftState>,
        working: DraftState,
        before: DraftLifecycleView,
        mut explicit: Vec<DraftTransition>,
        viewer: Option<&PlayerId>,
    ) -> ActionOutcome {
        let after = DraftLifecycleView::of(&working);
        let mut transitions = derive_draft_transitions(&before, &after);
        transitions.append(&mut explicit);

        **guard = working;
        let state: &DraftState = &**guard;

        self.persist(state).await;

        for transition in &transitions {
            match transition {
                DraftTransition::PhaseChanged { from, to } => {
                    info!(channel = %state.channel, %from, %to, "Draft phase changed");
                }
                other => debug!(channel = %state.channel, transition = ?other, "Draft transition"),
            }
        }

        if state.phase == Phase::Complete && self.registry.remove(&state.channel, handle) {
            info!(
                channel = %state.channel,
                players = state.player_count(),
                "Draft complete; session archived"
            );
        }

        ActionOutcome {
            view: draft_view(state, viewer),
            transitions,
        }
    }

    /// Best-effort snapshot write; the in-memory state is already
    /// authoritative.
    pub(super) async fn persist(&self, state: &DraftState) {
        if let Err(e) = save_draft(self.store.as_ref(), state).await {
            warn!(
                channel = %state.channel,
                phase = %state.phase,
                error = %e,
                "Failed to persist draft snapshot"
            );
        }
    }
}
