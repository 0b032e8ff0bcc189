use actix_web::http::StatusCode;
use actix_web::test;
use drafter::infra::state::build_state;

use crate::common::read_json;
use crate::support::create_test_app;

#[actix_web::test]
async fn health_reports_ok_and_active_sessions() {
    let state = build_state().with_rng_seed(1).build();
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/channels/health-check/draft")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_sessions"], 1);
    assert!(body["app_version"].is_string());
}

#[actix_web::test]
async fn faction_catalog_is_served_in_index_order() {
    let state = build_state().with_rng_seed(2).build();
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/factions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    let entries = body.as_array().expect("catalog is an array");
    assert_eq!(entries.len(), 25);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry["index"], i + 1);
        assert!(!entry["name"].as_str().unwrap_or_default().is_empty());
    }
}
