//! Error codes for the housing bubble backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP problem details and on the websocket `error` event.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Wrong moderator password
    Unauthorized,

    // Request Validation
    /// Action does not fit the player's role or fails a numeric/affordability check
    InvalidAction,
    /// Player already acted in the current round
    AlreadyActed,
    /// Malformed request body or frame
    BadRequest,

    // Resource Not Found
    /// Unknown session code
    GameNotFound,
    /// Connection is not a participant of the session
    PlayerNotFound,

    // Session Conflicts
    /// Participant cap reached
    GameFull,
    /// Role pool ran dry before the participant cap
    RolesExhausted,
    /// Connection already joined this session
    AlreadyJoined,
    /// Moderator ended the game
    GameOver,
    /// Session code collision
    JoinCodeConflict,

    /// Invalid server configuration
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",

            Self::InvalidAction => "INVALID_ACTION",
            Self::AlreadyActed => "ALREADY_ACTED",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::GameFull => "GAME_FULL",
            Self::RolesExhausted => "ROLES_EXHAUSTED",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::GameOver => "GAME_OVER",
            Self::JoinCodeConflict => "JOIN_CODE_CONFLICT",

            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
