use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod games;
pub mod health;
pub mod realtime;

/// Configure application routes.
///
/// `main.rs` and the integration tests both call this, so every path is
/// registered in one place.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies become problem details like every other error.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Realtime route: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
