use serde::Serialize;
use uuid::Uuid;

use crate::domain::loan::LoanId;
use crate::domain::property::PropertyId;
use crate::domain::roles::Role;

/// Transport-level connection identity; one per websocket.
pub type ConnectionId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    /// Cash balance. Never clamped; see `Game::apply_action` callers.
    pub money: f64,
    pub properties: Vec<PropertyId>,
    pub loans: Vec<LoanId>,
    pub credit_score: u32,
    pub actions_taken: u32,
}

impl Player {
    pub fn student(name: impl Into<String>, role: Role, money: f64, credit_score: u32) -> Self {
        Self {
            name: name.into(),
            role,
            money,
            properties: Vec::new(),
            loans: Vec::new(),
            credit_score,
            actions_taken: 0,
        }
    }

    pub fn moderator(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Moderator,
            money: 0.0,
            properties: Vec::new(),
            loans: Vec::new(),
            credit_score: 0,
            actions_taken: 0,
        }
    }

    pub fn owns(&self, property_id: PropertyId) -> bool {
        self.properties.contains(&property_id)
    }
}
