//! Read-only views of a game for clients.

use serde::Serialize;

use crate::domain::game::{Game, GamePhase, InterestRates};
use crate::domain::loan::Loan;
use crate::domain::property::Property;
use crate::domain::roles::Role;

/// Sent to a connection right after it joins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialState {
    pub market_price: f64,
    /// Number of registered participants.
    pub players: usize,
    pub interest_rates: InterestRates,
    pub properties: Vec<Property>,
    /// Only the moderator and the lending roles see the loan book; everyone
    /// else gets an empty list.
    pub loans: Vec<Loan>,
}

impl InitialState {
    pub fn for_role(game: &Game, role: Role) -> Self {
        Self {
            market_price: game.market_price,
            players: game.players.len(),
            interest_rates: game.interest_rates,
            properties: game.properties.clone(),
            loans: if role.sees_loans() {
                game.loans.clone()
            } else {
                Vec::new()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub role: Role,
}

/// Join-by-code lookup result. Carries nothing private to any one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicGameView {
    pub game_id: String,
    pub phase: GamePhase,
    pub round: u32,
    pub market_price: f64,
    pub bubble_popped: bool,
    pub max_players: usize,
    pub roles_remaining: usize,
    pub players: Vec<PlayerSummary>,
}

impl PublicGameView {
    pub fn of(game: &Game) -> Self {
        let players = game
            .join_order
            .iter()
            .filter_map(|id| game.players.get(id))
            .map(|p| PlayerSummary {
                name: p.name.clone(),
                role: p.role,
            })
            .collect();

        Self {
            game_id: game.id.clone(),
            phase: game.phase,
            round: game.round,
            market_price: game.market_price,
            bubble_popped: game.bubble_popped,
            max_players: game.rules.max_players,
            roles_remaining: game.role_pool().remaining(),
            players,
        }
    }
}
