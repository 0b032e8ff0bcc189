use tracing::debug;

use crate::domain::catalog::FactionId;
use crate::domain::draft_transition::DraftTransition;
use crate::domain::ids::{ChannelId, PlayerId};
use crate::domain::picks::make_pick;
use crate::domain::selection::submit_selection;
use crate::domain::state::{Pick, PickCategory};
use crate::domain::voting::cast_vote;
use crate::error::AppError;
use crate::services::draft_flow::{ActionOutcome, DraftFlowService};

impl DraftFlowService {
    /// Submit a primary/optional pair (catalog indices).
    pub async fn select(
        &self,
        channel: &ChannelId,
        player: &PlayerId,
        primary: u32,
        optional: u32,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, player = %player, primary, optional, "Selection submitted");

        let primary = FactionId::try_new(primary)?;
        let optional = FactionId::try_new(optional)?;
        self.run_mutation(channel, Some(player), |state, rng| {
            submit_selection(state, player, primary, optional, rng)?;
            Ok(Vec::<DraftTransition>::new())
        })
        .await
    }

    pub async fn vote(
        &self,
        channel: &ChannelId,
        player: &PlayerId,
        faction: u32,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, player = %player, faction, "Vote cast");

        let faction = FactionId::try_new(faction)?;
        self.run_mutation(channel, Some(player), |state, _| {
            let outcome = cast_vote(state, player, faction)?;
            debug!(
                promoted = outcome.promoted,
                voting_closed = outcome.voting_closed,
                "Vote applied"
            );
            Ok(Vec::new())
        })
        .await
    }

    pub async fn pick(
        &self,
        channel: &ChannelId,
        player: &PlayerId,
        category: PickCategory,
        value: u32,
    ) -> Result<ActionOutcome, AppError> {
        debug!(channel = %channel, player = %player, %category, value, "Pick submitted");

        let pick = Pick::from_parts(category, value)?;
        self.run_mutation(channel, Some(player), |state, _| {
            make_pick(state, player, pick)?;
            Ok(Vec::new())
        })
        .await
    }
}
