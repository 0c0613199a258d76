use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::player::ConnectionId;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::services::game_flow::{self, ActionRequest, JoinRequest, ModeratorOutcome, ModeratorRequest};
use crate::state::app_state::AppState;
use crate::ws::hub::RoomEvent;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One websocket connection. Its id is the player identity inside a game.
pub struct WsSession {
    conn_id: ConnectionId,
    app_state: web::Data<AppState>,
    /// The game room this connection receives broadcasts for.
    room: Option<String>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: ConnectionId, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            room: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_domain_error(ctx: &mut ws::WebsocketContext<Self>, err: &DomainError) {
        Self::send_json(ctx, &ServerMsg::error(err.code(), err.to_string()));
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn enter_room(&mut self, game_id: &str, ctx: &mut ws::WebsocketContext<Self>) {
        if self.room.as_deref() == Some(game_id) {
            return;
        }
        if let Some(previous) = self.room.take() {
            self.app_state.rooms.unregister(&previous, self.conn_id);
        }
        let recipient = ctx.address().recipient::<RoomEvent>();
        self.app_state
            .rooms
            .register(game_id, self.conn_id, recipient);
        self.room = Some(game_id.to_string());
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let cmd = match serde_json::from_str::<ClientMsg>(text) {
            Ok(cmd) => cmd,
            Err(err) => {
                debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] malformed frame");
                Self::send_json(
                    ctx,
                    &ServerMsg::error(ErrorCode::BadRequest, format!("Malformed message: {err}")),
                );
                return;
            }
        };

        match cmd {
            ClientMsg::Join(req) => self.on_join(&req, ctx),
            ClientMsg::TaAction(req) => self.on_moderate(&req, ctx),
            ClientMsg::PlayerAction(req) => self.on_action(&req, ctx),
        }
    }

    fn on_join(&mut self, req: &JoinRequest, ctx: &mut ws::WebsocketContext<Self>) {
        match game_flow::join(&self.app_state.sessions, self.conn_id, req) {
            Ok(outcome) => {
                self.enter_room(&outcome.game_id, ctx);
                Self::send_json(
                    ctx,
                    &ServerMsg::GameJoined {
                        game_id: outcome.game_id.clone(),
                        player_id: self.conn_id,
                        role: outcome.role,
                        initial_state: outcome.initial_state,
                    },
                );
                self.app_state.rooms.broadcast(
                    &outcome.game_id,
                    &ServerMsg::PlayerJoined {
                        name: outcome.name,
                        role: outcome.role,
                    },
                );
            }
            Err(err) => {
                debug!(conn_id = %self.conn_id, game_id = %req.game_id, error = %err, "[WS SESSION] join rejected");
                Self::send_domain_error(ctx, &err);
            }
        }
    }

    fn on_moderate(&mut self, req: &ModeratorRequest, ctx: &mut ws::WebsocketContext<Self>) {
        match game_flow::moderate(&self.app_state.sessions, req) {
            Ok(ModeratorOutcome::RoundUpdate {
                game_id,
                report,
                waiting_for,
            }) => {
                self.app_state.rooms.broadcast(
                    &game_id,
                    &ServerMsg::RoundUpdate {
                        round: report.round,
                        market_price: report.market_price,
                        bubble_popped: report.bubble_popped,
                        waiting_for,
                    },
                );
            }
            Ok(ModeratorOutcome::GameOver { game_id, scores }) => {
                self.app_state
                    .rooms
                    .broadcast(&game_id, &ServerMsg::GameOver { scores });
            }
            Err(err) => {
                debug!(conn_id = %self.conn_id, game_id = %req.game_id, error = %err, "[WS SESSION] moderator command rejected");
                Self::send_domain_error(ctx, &err);
            }
        }
    }

    fn on_action(&mut self, req: &ActionRequest, ctx: &mut ws::WebsocketContext<Self>) {
        match game_flow::act(&self.app_state.sessions, self.conn_id, req) {
            Ok(outcome) => {
                Self::send_json(
                    ctx,
                    &ServerMsg::ActionResult {
                        success: true,
                        message: outcome.receipt.message.clone(),
                        new_balance: Some(outcome.receipt.new_balance),
                    },
                );
                self.app_state.rooms.broadcast(
                    &outcome.game_id,
                    &ServerMsg::PlayerActed {
                        player_id: outcome.player_id,
                        action: outcome.receipt.message,
                        waiting_for: outcome.waiting_for,
                    },
                );
            }
            Err(DomainError::InvalidAction(message)) => {
                Self::send_json(ctx, &ServerMsg::action_failed(message));
            }
            Err(err) => Self::send_domain_error(ctx, &err),
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(room) = self.room.take() {
            self.app_state.rooms.unregister(&room, self.conn_id);
        }
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::error(ErrorCode::BadRequest, "Binary frames are not supported"),
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.payload.to_string());
    }
}
