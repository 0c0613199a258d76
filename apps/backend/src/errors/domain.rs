//! Domain-level error type used across the game core and services.
//!
//! This error type is HTTP- and transport-agnostic. Handlers convert it into
//! `crate::error::AppError` for REST responses, or into a websocket `error` /
//! `action_result` event.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
}

/// Session-level conflicts raised by admission and the game lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    GameFull,
    RolesExhausted,
    AlreadyJoined,
    GameOver,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing game or player
    NotFound(NotFoundKind, String),
    /// Bad moderator password
    Unauthorized(String),
    /// Connection already acted this round
    AlreadyActed,
    /// Role/action mismatch or a failed numeric constraint
    InvalidAction(String),
    /// Admission or lifecycle conflict
    Conflict(ConflictKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotFound(_, d) => write!(f, "{d}"),
            DomainError::Unauthorized(d) => write!(f, "{d}"),
            DomainError::AlreadyActed => write!(f, "Already acted this round"),
            DomainError::InvalidAction(d) => write!(f, "{d}"),
            DomainError::Conflict(_, d) => write!(f, "{d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized(detail.into())
    }
    pub fn invalid_action(detail: impl Into<String>) -> Self {
        Self::InvalidAction(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    pub fn game_not_found() -> Self {
        Self::not_found(NotFoundKind::Game, "Game not found")
    }
    pub fn player_not_found() -> Self {
        Self::not_found(NotFoundKind::Player, "Player not found")
    }

    /// Wire-level code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::NotFound(NotFoundKind::Game, _) => ErrorCode::GameNotFound,
            DomainError::NotFound(NotFoundKind::Player, _) => ErrorCode::PlayerNotFound,
            DomainError::Unauthorized(_) => ErrorCode::Unauthorized,
            DomainError::AlreadyActed => ErrorCode::AlreadyActed,
            DomainError::InvalidAction(_) => ErrorCode::InvalidAction,
            DomainError::Conflict(ConflictKind::GameFull, _) => ErrorCode::GameFull,
            DomainError::Conflict(ConflictKind::RolesExhausted, _) => ErrorCode::RolesExhausted,
            DomainError::Conflict(ConflictKind::AlreadyJoined, _) => ErrorCode::AlreadyJoined,
            DomainError::Conflict(ConflictKind::GameOver, _) => ErrorCode::GameOver,
        }
    }
}
