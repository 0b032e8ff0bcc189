use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod drafts;
pub mod factions;
pub mod health;

/// Configure application routes. Shared by `main.rs` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies become problem+json like every other error.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
    }));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Catalog: /api/factions
    cfg.service(web::scope("/api/factions").configure(factions::configure_routes));

    // Draft routes: /api/channels/{channel}/draft/**
    cfg.service(web::scope("/api/channels/{channel}/draft").configure(drafts::configure_routes));
}
