//! A complete draft played over HTTP.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use drafter::infra::state::build_state;
use drafter_test_support::unique_helpers::{player_names, unique_channel};
use serde_json::{json, Value};

use crate::common::{read_json, transition_types};
use crate::support::create_test_app;

async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    (status, read_json(resp).await)
}

fn as_player(req: test::TestRequest, player: &str) -> test::TestRequest {
    req.insert_header(("X-Player-Id", player))
}

fn index_of(entry: &Value) -> u64 {
    entry["index"].as_u64().expect("faction entry has an index")
}

#[actix_web::test]
async fn two_players_draft_over_http() {
    let state = build_state().with_rng_seed(7).build();
    let app = create_test_app(state).await;
    let base = format!("/api/channels/{}/draft", unique_channel("http"));
    let names = player_names("p", 2);

    let (status, body) = send(&app, test::TestRequest::post().uri(&base)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["view"]["state"]["phase"], "idle");
    assert_eq!(transition_types(&body), vec!["session_opened"]);

    for name in &names {
        let req = as_player(test::TestRequest::post().uri(&format!("{base}/join")), name);
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transition_types(&body), vec!["player_joined"]);
    }

    let (status, body) = send(&app, test::TestRequest::post().uri(&format!("{base}/begin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["state"]["phase"], "selecting");
    assert!(body["view"]["map"]["url"].is_string());

    // Selection: first dealt faction as primary, second as optional.
    for name in &names {
        let req = as_player(test::TestRequest::get().uri(&base), name);
        let (_, body) = send(&app, req).await;
        let hand = body["view"]["state"]["data"]["your_factions"]
            .as_array()
            .expect("players see their own hand")
            .clone();
        assert_eq!(hand.len(), 4);

        let req = as_player(test::TestRequest::post().uri(&format!("{base}/select")), name)
            .set_json(json!({ "primary": index_of(&hand[0]), "optional": index_of(&hand[1]) }));
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Voting: whoever holds the turn backs the first optional faction.
    let (_, mut body) = send(&app, test::TestRequest::get().uri(&base)).await;
    assert_eq!(body["view"]["state"]["phase"], "voting");
    while body["view"]["state"]["phase"] == "voting" {
        let data = &body["view"]["state"]["data"];
        let voter = data["to_act"].as_str().expect("voting turn holder").to_string();
        let target = index_of(&data["optional_pool"][0]["faction"]);
        let req = as_player(test::TestRequest::post().uri(&format!("{base}/vote")), &voter)
            .set_json(json!({ "faction": target }));
        let (status, next) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        body = next;
    }
    assert_eq!(body["view"]["state"]["phase"], "snake_draft");

    // Snake draft: faction, then location, then strategy.
    let mut picks = 0;
    while body["view"]["state"]["phase"] == "snake_draft" {
        picks += 1;
        assert!(picks <= 6, "six picks complete a two-player draft");
        let data = &body["view"]["state"]["data"];
        let picker = data["to_act"].as_str().expect("pick turn holder").to_string();
        let mine = data["picks"]
            .as_array()
            .expect("picks table")
            .iter()
            .find(|p| p["player"] == picker.as_str())
            .expect("picker has an entry")
            .clone();

        let (category, value) = if mine["faction"].is_null() {
            ("faction", index_of(&data["available_factions"][0]))
        } else if mine["location"].is_null() {
            ("location", data["available_locations"][0].as_u64().expect("location"))
        } else {
            ("strategy", data["available_strategies"][0].as_u64().expect("strategy"))
        };

        let req = as_player(test::TestRequest::post().uri(&format!("{base}/pick")), &picker)
            .set_json(json!({ "category": category, "value": value }));
        let (status, next) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        body = next;
    }

    assert_eq!(body["view"]["state"]["phase"], "complete");
    let types = transition_types(&body);
    assert!(types.contains(&"draft_completed".to_string()));
    assert_eq!(
        body["view"]["state"]["data"]["picks"]
            .as_array()
            .expect("final picks")
            .len(),
        2
    );

    // Archived: the channel no longer has a running session.
    let resp = test::call_service(&app, test::TestRequest::get().uri(&base).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn spectators_get_a_view_without_a_hand() {
    let state = build_state().with_rng_seed(8).build();
    let app = create_test_app(state).await;
    let base = format!("/api/channels/{}/draft", unique_channel("watch"));

    send(&app, test::TestRequest::post().uri(&base)).await;
    for name in player_names("p", 2) {
        let req = as_player(test::TestRequest::post().uri(&format!("{base}/join")), &name);
        send(&app, req).await;
    }
    send(&app, test::TestRequest::post().uri(&format!("{base}/begin"))).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(&base)).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["view"]["state"]["data"];
    assert!(data["your_factions"].is_null());
    assert_eq!(data["waiting_on"].as_array().map(Vec::len), Some(2));
    assert!(body["transitions"].as_array().is_some_and(Vec::is_empty));
}

#[actix_web::test]
async fn regenerate_map_over_http_reports_the_new_seed() {
    let state = build_state().with_rng_seed(9).build();
    let app = create_test_app(state).await;
    let base = format!("/api/channels/{}/draft", unique_channel("map"));

    send(&app, test::TestRequest::post().uri(&base)).await;
    for name in player_names("p", 2) {
        let req = as_player(test::TestRequest::post().uri(&format!("{base}/join")), &name);
        send(&app, req).await;
    }
    send(&app, test::TestRequest::post().uri(&format!("{base}/begin"))).await;

    let req = as_player(test::TestRequest::post().uri(&format!("{base}/map")), "p-2");
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transitions"][0]["type"], "map_regenerated");
    assert_eq!(body["transitions"][0]["seed"], body["view"]["map"]["seed"]);
}
