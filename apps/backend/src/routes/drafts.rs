//! Draft HTTP routes, all scoped under `/api/channels/{channel}/draft`.
//!
//! Every success body is an `ActionOutcome` (`{ view, transitions }`).

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::ids::PlayerId;
use crate::domain::state::PickCategory;
use crate::error::AppError;
use crate::extractors::{ActingPlayer, ChannelPath};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub primary: u32,
    pub optional: u32,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub faction: u32,
}

#[derive(Debug, Deserialize)]
pub struct PickRequest {
    pub category: String,
    pub value: u32,
}

fn viewer(player: Option<&ActingPlayer>) -> Option<&PlayerId> {
    player.map(|p| &p.0)
}

/// POST /api/channels/{channel}/draft
async fn start_session(
    channel: ChannelPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state.drafts.start_session(&channel.0).await?;
    Ok(HttpResponse::Created().json(outcome))
}

/// GET /api/channels/{channel}/draft
///
/// What is visible depends on the viewer: during selection only the viewer's
/// own four factions are included.
async fn list_state(
    channel: ChannelPath,
    player: Option<ActingPlayer>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .drafts
        .list_state(&channel.0, viewer(player.as_ref()))
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn join(
    channel: ChannelPath,
    player: ActingPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state.drafts.join(&channel.0, &player.0).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn begin(
    channel: ChannelPath,
    player: Option<ActingPlayer>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state.drafts.begin(&channel.0, viewer(player.as_ref())).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn select(
    channel: ChannelPath,
    player: ActingPlayer,
    body: web::Json<SelectRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .drafts
        .select(&channel.0, &player.0, body.primary, body.optional)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn vote(
    channel: ChannelPath,
    player: ActingPlayer,
    body: web::Json<VoteRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .drafts
        .vote(&channel.0, &player.0, body.faction)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn pick(
    channel: ChannelPath,
    player: ActingPlayer,
    body: web::Json<PickRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let category: PickCategory = body.category.parse()?;
    let outcome = app_state
        .drafts
        .pick(&channel.0, &player.0, category, body.value)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn regenerate_map(
    channel: ChannelPath,
    player: ActingPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .drafts
        .regenerate_map(&channel.0, &player.0)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn load_session(
    channel: ChannelPath,
    player: Option<ActingPlayer>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .drafts
        .load_session(&channel.0, viewer(player.as_ref()))
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(start_session))
            .route(web::get().to(list_state)),
    );
    cfg.service(web::resource("/join").route(web::post().to(join)));
    cfg.service(web::resource("/begin").route(web::post().to(begin)));
    cfg.service(web::resource("/select").route(web::post().to(select)));
    cfg.service(web::resource("/vote").route(web::post().to(vote)));
    cfg.service(web::resource("/pick").route(web::post().to(pick)));
    cfg.service(web::resource("/map").route(web::post().to(regenerate_map)));
    cfg.service(web::resource("/load").route(web::post().to(load_session)));
}
