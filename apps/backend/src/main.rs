use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bubble_backend::config::ServerConfig;
use bubble_backend::middleware::cors::cors_middleware;
use bubble_backend::middleware::request_trace::RequestTrace;
use bubble_backend::middleware::structured_logger::StructuredLogger;
use bubble_backend::middleware::trace_span::TraceSpan;
use bubble_backend::routes;
use bubble_backend::services::sessions::spawn_sweeper;
use bubble_backend::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.clone());
    let _sweeper = spawn_sweeper(
        Arc::clone(&app_state.sessions),
        config.session_sweep_interval,
        config.session_idle_ttl,
    );

    info!(
        host = %config.host,
        port = config.port,
        max_players = config.max_players,
        idle_ttl_secs = config.session_idle_ttl.as_secs(),
        "🚀 Starting Housing Bubble backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
