//! Game flow service: maps client requests onto the session registry and the
//! domain, and returns outcome values for the transport to deliver.
//!
//! Every call locks exactly one session for its synchronous duration and
//! never awaits while holding the lock.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::actions::{ActionReceipt, PlayerAction};
use crate::domain::game::{RoundReport, Score};
use crate::domain::player::ConnectionId;
use crate::domain::roles::Role;
use crate::domain::snapshot::{InitialState, PublicGameView};
use crate::errors::domain::DomainError;
use crate::services::sessions::{SessionHandle, SessionRegistry};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinRequest {
    pub game_id: String,
    pub name: String,
    #[serde(default)]
    pub is_ta: bool,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeratorCommand {
    StartRound,
    EndGame,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModeratorRequest {
    pub game_id: String,
    pub action: ModeratorCommand,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionRequest {
    pub game_id: String,
    pub action_type: String,
    #[serde(default)]
    pub action_data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub game_id: String,
    pub name: String,
    pub role: Role,
    pub initial_state: InitialState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModeratorOutcome {
    RoundUpdate {
        game_id: String,
        report: RoundReport,
        waiting_for: Vec<ConnectionId>,
    },
    GameOver {
        game_id: String,
        scores: Vec<Score>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActOutcome {
    pub game_id: String,
    pub player_id: ConnectionId,
    pub receipt: ActionReceipt,
    pub waiting_for: Vec<ConnectionId>,
}

fn session(registry: &SessionRegistry, game_id: &str) -> Result<SessionHandle, DomainError> {
    registry
        .get(game_id)
        .ok_or_else(DomainError::game_not_found)
}

/// Admit `conn` to a session, as moderator when `is_ta` is set.
pub fn join(
    registry: &SessionRegistry,
    conn: ConnectionId,
    req: &JoinRequest,
) -> Result<JoinOutcome, DomainError> {
    let handle = session(registry, &req.game_id)?;
    let mut session = handle.lock();

    if req.is_ta {
        session
            .game
            .authorize_moderator(req.password.as_deref().unwrap_or_default())?;
    }
    let role = session.game.add_player(conn, req.name.clone(), req.is_ta)?;
    session.touch();

    info!(
        game_id = %req.game_id,
        conn_id = %conn,
        role = %role,
        players = session.game.players.len(),
        "Player joined"
    );

    Ok(JoinOutcome {
        game_id: req.game_id.clone(),
        name: req.name.clone(),
        role,
        initial_state: InitialState::for_role(&session.game, role),
    })
}

/// Run a password-checked moderator command.
pub fn moderate(
    registry: &SessionRegistry,
    req: &ModeratorRequest,
) -> Result<ModeratorOutcome, DomainError> {
    let handle = session(registry, &req.game_id)?;
    let mut guard = handle.lock();
    let session = &mut *guard;

    session.game.authorize_moderator(&req.password)?;
    session.touch();

    match req.action {
        ModeratorCommand::StartRound => {
            let report = session.game.process_round(&mut session.dice)?;
            info!(
                game_id = %req.game_id,
                round = report.round,
                price_before = report.price_before,
                market_price = report.market_price,
                rate_pressure = report.pressure.rate,
                speculation_pressure = report.pressure.speculation,
                supply_demand_pressure = report.pressure.supply_demand,
                debt_pressure = report.pressure.debt,
                shock = report.shock,
                popped = report.popped_this_round,
                "Round started"
            );
            Ok(ModeratorOutcome::RoundUpdate {
                game_id: req.game_id.clone(),
                report,
                waiting_for: session.game.waiting_for(),
            })
        }
        ModeratorCommand::EndGame => {
            session.game.ensure_not_over()?;
            let scores = session.game.end_game();
            info!(
                game_id = %req.game_id,
                rounds = session.game.round,
                players = scores.len(),
                "Game over"
            );
            Ok(ModeratorOutcome::GameOver {
                game_id: req.game_id.clone(),
                scores,
            })
        }
    }
}

/// Apply one player action.
///
/// Participation and turn checks run before the action payload is decoded,
/// so a player who already acted hears that rather than a decode error.
pub fn act(
    registry: &SessionRegistry,
    conn: ConnectionId,
    req: &ActionRequest,
) -> Result<ActOutcome, DomainError> {
    let handle = session(registry, &req.game_id)?;
    let mut session = handle.lock();

    session.game.ensure_can_act(&conn)?;
    let action = PlayerAction::from_parts(&req.action_type, req.action_data.clone())?;
    let receipt = session.game.apply_action(conn, &action)?;
    session.touch();

    debug!(
        game_id = %req.game_id,
        conn_id = %conn,
        action = action.kind(),
        new_balance = receipt.new_balance,
        "Player acted"
    );

    Ok(ActOutcome {
        game_id: req.game_id.clone(),
        player_id: conn,
        receipt,
        waiting_for: session.game.waiting_for(),
    })
}

/// Public summary for the join-by-code lookup.
pub fn public_view(registry: &SessionRegistry, game_id: &str) -> Result<PublicGameView, DomainError> {
    let handle = session(registry, game_id)?;
    let session = handle.lock();
    Ok(PublicGameView::of(&session.game))
}
