use actix_web::{web, HttpResponse};

use crate::domain::catalog::catalog;

/// GET /api/factions
async fn list_factions() -> HttpResponse {
    HttpResponse::Ok().json(catalog())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list_factions)));
}
