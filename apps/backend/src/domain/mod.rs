//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod game;
pub mod loan;
pub mod market;
pub mod player;
pub mod property;
pub mod roles;
pub mod rules;
pub mod snapshot;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_market;
#[cfg(test)]
mod tests_props_roles;

// Re-exports for ergonomics
pub use actions::{ActionReceipt, PlayerAction};
pub use game::{Game, GamePhase, InterestRates, RoundReport, Score};
pub use loan::{Loan, LoanId, LoanStatus};
pub use market::{FixedDice, MarketDice, MarketPressure, RandomDice};
pub use player::{ConnectionId, Player};
pub use property::{Location, Property, PropertyId};
pub use roles::{Role, RolePool};
pub use rules::GameRules;
pub use snapshot::{InitialState, PublicGameView};
