//! HTTP controllers. Everything lives under `/api`; anything under that prefix
//! that no controller claims answers 404.

use actix_web::{HttpRequest, HttpResponse, web};
use minimd_types::ErrorBody;

pub mod health;
pub mod notes;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config_routes)
            .configure(notes::config)
            .default_service(web::to(api_not_found)),
    );
}

async fn api_not_found(req: HttpRequest) -> HttpResponse {
    log::debug!("[API] No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}
