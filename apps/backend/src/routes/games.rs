//! Game session HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::services::game_flow;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    /// Moderator password for the new session; may be empty.
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct CreateGameResponse {
    game_id: String,
}

/// POST /api/games
///
/// Opens a new session and returns its join code.
async fn create_game(
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = app_state.sessions.create(&body.password)?;
    info!(game_id = %game_id, sessions = app_state.sessions.len(), "Game created over HTTP");
    Ok(HttpResponse::Created().json(CreateGameResponse { game_id }))
}

/// GET /api/games/{game_id}
///
/// Join-by-code lookup. Returns the public view, or 404 problem details when
/// the code is unknown.
async fn get_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = game_flow::public_view(&app_state.sessions, &path.into_inner())?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)))
        .service(web::resource("/{game_id}").route(web::get().to(get_game)));
}
