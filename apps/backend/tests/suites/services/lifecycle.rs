//! Opening, joining, beginning and inspecting a draft session.

use std::sync::Arc;

use drafter::adapters::snapshots::InMemorySnapshotStore;
use drafter::domain::state::Phase;
use drafter::domain::{DraftTransition, PhaseView};
use drafter::infra::state::build_state;
use drafter::services::map::MapProvider;
use drafter::{AppError, ErrorCode};

use crate::support::draft_driver::{open_lobby, own_factions};
use crate::support::fakes::{FailingMapProvider, FailingStore};
use crate::support::service::{fresh_channel, player, players, service_with_memory_store};

#[tokio::test]
async fn start_session_opens_an_idle_lobby() -> Result<(), AppError> {
    let (service, store) = service_with_memory_store(1);
    let channel = fresh_channel("open");

    let outcome = service.start_session(&channel).await?;

    assert_eq!(outcome.transitions, vec![DraftTransition::SessionOpened]);
    assert!(outcome.view.players.is_empty());
    assert!(outcome.view.map.is_none());
    match outcome.view.state {
        PhaseView::Idle(lobby) => {
            assert_eq!(lobby.min_players, 2);
            assert!(!lobby.can_begin);
        }
        other => panic!("expected idle lobby, got {other:?}"),
    }
    assert_eq!(service.active_sessions(), 1);
    assert_eq!(store.len(), 1, "opening a session writes its first snapshot");
    Ok(())
}

#[tokio::test]
async fn second_start_in_same_channel_conflicts() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(2);
    let channel = fresh_channel("dup");
    service.start_session(&channel).await?;

    let err = service.start_session(&channel).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionActive);
    assert_eq!(service.active_sessions(), 1);
    Ok(())
}

#[tokio::test]
async fn actions_without_a_session_are_not_found() {
    let (service, _store) = service_with_memory_store(3);
    let channel = fresh_channel("ghost");
    let who = &player("p");

    let err = service.join(&channel, who).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);

    let err = service.list_state(&channel, None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);

    let err = service.vote(&channel, who, 0).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
}

#[tokio::test]
async fn joining_twice_is_rejected_and_roster_is_kept() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(4);
    let channel = fresh_channel("join");
    let roster = players("p", 2);

    let outcome = open_lobby(&service, &channel, &roster).await?;
    assert_eq!(outcome.view.players, roster);
    assert_eq!(
        outcome.transitions,
        vec![DraftTransition::PlayerJoined {
            player: roster[1].clone()
        }]
    );

    let err = service.join(&channel, &roster[0]).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyJoined);

    let view = service.list_state(&channel, None).await?.view;
    assert_eq!(view.players, roster);
    Ok(())
}

#[tokio::test]
async fn begin_needs_two_players() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(5);
    let channel = fresh_channel("solo");
    open_lobby(&service, &channel, &players("p", 1)).await?;

    let err = service.begin(&channel, None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientPlayers);

    let view = service.list_state(&channel, None).await?.view;
    assert!(matches!(view.state, PhaseView::Idle(_)));
    Ok(())
}

#[tokio::test]
async fn begin_deals_hands_and_draws_a_map() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(6);
    let channel = fresh_channel("begin");
    let roster = players("p", 3);
    open_lobby(&service, &channel, &roster).await?;

    let outcome = service.begin(&channel, Some(&roster[0])).await?;

    assert_eq!(
        outcome.transitions,
        vec![DraftTransition::PhaseChanged {
            from: Phase::Idle,
            to: Phase::Selecting,
        }]
    );
    let map = outcome.view.map.clone().expect("begin draws a map");
    assert!((1..=9999).contains(&map.seed));
    assert!(map
        .url
        .ends_with(&format!("?settings=TFFFF3000{}FFF", map.seed)));

    let mut dealt = Vec::new();
    for player in &roster {
        let hand = own_factions(&service, &channel, player).await?;
        assert_eq!(hand.len(), 4);
        dealt.extend(hand.into_iter().map(|f| f.index));
    }
    dealt.sort_unstable();
    dealt.dedup();
    assert_eq!(dealt.len(), 12, "three players share no factions");

    let err = service.join(&channel, &player("late")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
    Ok(())
}

#[tokio::test]
async fn spectators_do_not_see_private_hands() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(7);
    let channel = fresh_channel("spectate");
    let roster = players("p", 2);
    open_lobby(&service, &channel, &roster).await?;
    service.begin(&channel, None).await?;

    let spectator = &player("watcher");
    let view = service.list_state(&channel, Some(spectator)).await?.view;
    match view.state {
        PhaseView::Selecting(selecting) => {
            assert!(selecting.your_factions.is_none());
            assert!(selecting.submitted.is_empty());
            assert_eq!(selecting.waiting_on, roster);
        }
        other => panic!("expected selecting phase, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn map_failure_leaves_the_lobby_untouched() -> Result<(), AppError> {
    let maps: Arc<dyn MapProvider> = Arc::new(FailingMapProvider);
    let service = build_state()
        .with_store(Arc::new(InMemorySnapshotStore::new()))
        .with_map_provider(maps)
        .with_rng_seed(8)
        .build_service();
    let channel = fresh_channel("nomap");
    open_lobby(&service, &channel, &players("p", 2)).await?;

    let err = service.begin(&channel, None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MapProviderUnavailable);
    assert_eq!(err.status().as_u16(), 503);

    let view = service.list_state(&channel, None).await?.view;
    assert!(matches!(view.state, PhaseView::Idle(_)));
    assert!(view.map.is_none());
    Ok(())
}

#[tokio::test]
async fn regenerate_map_is_for_enrolled_players_while_selecting() -> Result<(), AppError> {
    let (service, _store) = service_with_memory_store(9);
    let channel = fresh_channel("remap");
    let roster = players("p", 2);
    open_lobby(&service, &channel, &roster).await?;

    let err = service
        .regenerate_map(&channel, &roster[0])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);

    service.begin(&channel, None).await?;

    let outsider = &player("outsider");
    let err = service.regenerate_map(&channel, outsider).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotEnrolled);

    let outcome = service.regenerate_map(&channel, &roster[1]).await?;
    let map = outcome.view.map.expect("map is present while selecting");
    assert_eq!(
        outcome.transitions,
        vec![DraftTransition::MapRegenerated { seed: map.seed }]
    );
    Ok(())
}

#[tokio::test]
async fn storage_failures_do_not_block_play() -> Result<(), AppError> {
    let service = build_state()
        .with_store(Arc::new(FailingStore))
        .with_rng_seed(10)
        .build_service();
    let channel = fresh_channel("nostore");

    open_lobby(&service, &channel, &players("p", 2)).await?;
    let outcome = service.begin(&channel, None).await?;
    assert!(matches!(outcome.view.state, PhaseView::Selecting(_)));
    Ok(())
}
