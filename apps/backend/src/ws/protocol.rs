//! JSON text frames exchanged over the game websocket, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::game::Score;
use crate::domain::player::ConnectionId;
use crate::domain::roles::Role;
use crate::domain::snapshot::InitialState;
use crate::errors::ErrorCode;
use crate::services::game_flow::{ActionRequest, JoinRequest, ModeratorRequest};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Join(JoinRequest),
    TaAction(ModeratorRequest),
    PlayerAction(ActionRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Caller only.
    GameJoined {
        game_id: String,
        player_id: ConnectionId,
        role: Role,
        initial_state: InitialState,
    },

    PlayerJoined {
        name: String,
        role: Role,
    },

    /// Caller only. `code` is the lower snake case form of [`ErrorCode`].
    Error {
        code: String,
        message: String,
    },

    RoundUpdate {
        round: u32,
        market_price: f64,
        bubble_popped: bool,
        waiting_for: Vec<ConnectionId>,
    },

    /// Caller only.
    ActionResult {
        success: bool,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_balance: Option<f64>,
    },

    PlayerActed {
        player_id: ConnectionId,
        /// The acting player's success message.
        action: String,
        waiting_for: Vec<ConnectionId>,
    },

    GameOver {
        scores: Vec<Score>,
    },
}

impl ServerMsg {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::Error {
            code: code.as_str().to_ascii_lowercase(),
            message: message.into(),
        }
    }

    pub fn action_failed(message: impl Into<String>) -> Self {
        ServerMsg::ActionResult {
            success: false,
            message: message.into(),
            new_balance: None,
        }
    }
}
