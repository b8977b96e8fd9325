use actix_web::{HttpResponse, Responder, web};
use minimd_types::HealthStatus;

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health_check))
            .default_service(web::to(super::api_not_found)),
    );
}

/// Reports `ok` when the database answers, `degraded` with a 503 otherwise.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime_secs = state.started_at.elapsed().as_secs();
    match state.db.ping() {
        Ok(()) => HttpResponse::Ok().json(HealthStatus {
            status: "ok".to_string(),
            version: VERSION.to_string(),
            uptime_secs,
        }),
        Err(e) => {
            log::error!("[HEALTH] Database ping failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthStatus {
                status: "degraded".to_string(),
                version: VERSION.to_string(),
                uptime_secs,
            })
        }
    }
}
