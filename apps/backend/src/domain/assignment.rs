//! Random faction assignment.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::catalog::{all_factions, FactionId};
use crate::domain::ids::PlayerId;
use crate::domain::state::FACTIONS_PER_PLAYER;
use crate::errors::domain::DomainError;

/// Deal four distinct factions to each player, in enrollment order.
///
/// The catalog is shuffled once and consumed front to back, so factions are
/// unique across players while `4 * players.len() <= 25`. Past that point a
/// player's hand is topped up from factions already dealt to earlier
/// players; a player never holds the same faction twice.
pub fn assign_factions<R: Rng + ?Sized>(
    players: &[PlayerId],
    rng: &mut R,
) -> Result<BTreeMap<PlayerId, [FactionId; FACTIONS_PER_PLAYER]>, DomainError> {
    let mut deck: Vec<FactionId> = all_factions().collect();
    deck.shuffle(rng);

    let mut next = 0usize;
    let mut out = BTreeMap::new();

    for player in players {
        let mut hand: Vec<FactionId> = Vec::with_capacity(FACTIONS_PER_PLAYER);
        while hand.len() < FACTIONS_PER_PLAYER && next < deck.len() {
            hand.push(deck[next]);
            next += 1;
        }

        if hand.len() < FACTIONS_PER_PLAYER {
            let mut reuse: Vec<FactionId> = deck[..next]
                .iter()
                .copied()
                .filter(|f| !hand.contains(f))
                .collect();
            reuse.shuffle(rng);
            let missing = FACTIONS_PER_PLAYER - hand.len();
            hand.extend(reuse.into_iter().take(missing));
        }

        let hand: [FactionId; FACTIONS_PER_PLAYER] = hand.try_into().map_err(|_| {
            DomainError::validation_other("Invariant violated: could not deal four factions")
        })?;
        out.insert(player.clone(), hand);
    }

    Ok(out)
}
