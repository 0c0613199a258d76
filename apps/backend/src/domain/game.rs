//! The per-session Game aggregate: admission, entity creation and the round
//! processor. Player actions live in `domain::actions`.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::domain::loan::{Loan, LoanId};
use crate::domain::market::{adjust_price, MarketDice, MarketInputs, MarketPressure};
use crate::domain::player::{ConnectionId, Player};
use crate::domain::property::{Location, Property, PropertyId};
use crate::domain::roles::{Role, RolePool};
use crate::domain::rules::{
    GameRules, BASE_MARKET_PRICE, BUBBLE_THRESHOLD, POP_PROBABILITY, POP_SHRINK_FACTOR,
    STARTING_BANK_RATE, STARTING_MORTGAGE_RATE,
};
use crate::errors::domain::{ConflictKind, DomainError};

/// Lifecycle of a session. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Created, no round processed yet.
    Idle,
    Running,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterestRates {
    pub mortgage: f64,
    pub bank: f64,
}

impl Default for InterestRates {
    fn default() -> Self {
        Self {
            mortgage: STARTING_MORTGAGE_RATE,
            bank: STARTING_BANK_RATE,
        }
    }
}

/// Final standing of one participant: `[name, money]` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score(pub String, pub f64);

/// What one `start_round` did to the market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// Round counter after the transition.
    pub round: u32,
    pub price_before: f64,
    pub market_price: f64,
    pub pressure: MarketPressure,
    pub shock: f64,
    pub popped_this_round: bool,
    pub bubble_popped: bool,
    pub rounds_since_pop: u32,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: String,
    moderator_password: String,
    pub rules: GameRules,
    pub market_price: f64,
    pub round: u32,
    pub phase: GamePhase,
    pub is_active: bool,
    pub bubble_popped: bool,
    /// Counted but no rule consumes it.
    pub rounds_since_pop: u32,
    pub players: HashMap<ConnectionId, Player>,
    /// Join order, for stable listings.
    pub join_order: Vec<ConnectionId>,
    role_pool: RolePool,
    pub interest_rates: InterestRates,
    pub properties: Vec<Property>,
    pub loans: Vec<Loan>,
    pub waiting_for_actions: HashSet<ConnectionId>,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(
        id: impl Into<String>,
        moderator_password: impl Into<String>,
        rules: GameRules,
        rng: &mut R,
    ) -> Self {
        let role_pool = RolePool::shuffled(rules.max_players, rng);
        Self {
            id: id.into(),
            moderator_password: moderator_password.into(),
            rules,
            market_price: BASE_MARKET_PRICE,
            round: 0,
            phase: GamePhase::Idle,
            is_active: false,
            bubble_popped: false,
            rounds_since_pop: 0,
            players: HashMap::new(),
            join_order: Vec::new(),
            role_pool,
            interest_rates: InterestRates::default(),
            properties: Vec::new(),
            loans: Vec::new(),
            waiting_for_actions: HashSet::new(),
        }
    }

    pub fn role_pool(&self) -> &RolePool {
        &self.role_pool
    }

    pub fn authorize_moderator(&self, password: &str) -> Result<(), DomainError> {
        if password == self.moderator_password {
            Ok(())
        } else {
            Err(DomainError::unauthorized("Invalid TA password"))
        }
    }

    pub fn ensure_not_over(&self) -> Result<(), DomainError> {
        if self.phase == GamePhase::Over {
            return Err(DomainError::conflict(ConflictKind::GameOver, "Game is over"));
        }
        Ok(())
    }

    pub fn player(&self, id: &ConnectionId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn require_player(&self, id: &ConnectionId) -> Result<&Player, DomainError> {
        self.players.get(id).ok_or_else(DomainError::player_not_found)
    }

    pub fn is_waiting_on(&self, id: &ConnectionId) -> bool {
        self.waiting_for_actions.contains(id)
    }

    /// Pending connections in join order.
    pub fn waiting_for(&self) -> Vec<ConnectionId> {
        self.join_order
            .iter()
            .filter(|id| self.waiting_for_actions.contains(id))
            .copied()
            .collect()
    }

    /// Admit a connection as moderator or as the next student role.
    ///
    /// Moderator authentication is the caller's job; by the time this runs
    /// the password has been checked.
    pub fn add_player(
        &mut self,
        id: ConnectionId,
        name: impl Into<String>,
        as_moderator: bool,
    ) -> Result<Role, DomainError> {
        self.ensure_not_over()?;
        if self.players.contains_key(&id) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                "Already joined this game",
            ));
        }

        if as_moderator {
            self.players.insert(id, Player::moderator(name));
            self.join_order.push(id);
            return Ok(Role::Moderator);
        }

        if self.players.len() >= self.rules.max_players {
            return Err(DomainError::conflict(ConflictKind::GameFull, "Game is full"));
        }
        let role = self.role_pool.draw().ok_or_else(|| {
            DomainError::conflict(ConflictKind::RolesExhausted, "No roles available")
        })?;

        self.players.insert(
            id,
            Player::student(
                name,
                role,
                self.rules.starting_cash,
                self.rules.starting_credit_score,
            ),
        );
        self.join_order.push(id);
        self.waiting_for_actions.insert(id);
        Ok(role)
    }

    pub fn create_property(&mut self, location: Location, quality: u8) -> PropertyId {
        let id = self.properties.len();
        self.properties
            .push(Property::new(id, location, quality, self.market_price));
        id
    }

    pub fn create_loan(
        &mut self,
        lender_id: ConnectionId,
        borrower_id: ConnectionId,
        amount: f64,
        interest_rate: f64,
        term: u32,
    ) -> LoanId {
        let id = self.loans.len();
        self.loans.push(Loan::open(
            id,
            lender_id,
            borrower_id,
            amount,
            interest_rate,
            term,
        ));
        id
    }

    pub fn outstanding_debt(&self) -> f64 {
        self.loans
            .iter()
            .filter(|loan| loan.is_outstanding())
            .map(|loan| loan.remaining_amount)
            .sum()
    }

    pub fn market_inputs(&self) -> MarketInputs {
        MarketInputs {
            mortgage_rate: self.interest_rates.mortgage,
            players: self.players.len(),
            speculators: self
                .players
                .values()
                .filter(|p| p.role == Role::Speculator)
                .count(),
            properties: self.properties.len(),
            outstanding_debt: self.outstanding_debt(),
        }
    }

    /// Advance the market by one round.
    pub fn process_round(&mut self, dice: &mut dyn MarketDice) -> Result<RoundReport, DomainError> {
        self.ensure_not_over()?;

        let price_before = self.market_price;
        let pressure = MarketPressure::from_inputs(&self.market_inputs());
        let shock = dice.shock();
        self.market_price = adjust_price(self.market_price, pressure.total() + shock);

        for property in &mut self.properties {
            property.revalue(self.market_price);
        }

        let mut popped_this_round = false;
        if !self.bubble_popped
            && self.market_price > BUBBLE_THRESHOLD
            && dice.pop_roll() < POP_PROBABILITY
        {
            self.bubble_popped = true;
            popped_this_round = true;
            // Valuations keep the pre-crash price until the next round.
            self.market_price *= POP_SHRINK_FACTOR;
        }

        if self.bubble_popped {
            self.rounds_since_pop += 1;
        }

        self.waiting_for_actions = self
            .players
            .iter()
            .filter(|(_, p)| !p.role.is_moderator())
            .map(|(id, _)| *id)
            .collect();
        self.round += 1;
        self.phase = GamePhase::Running;
        self.is_active = true;

        debug!(
            game_id = %self.id,
            round = self.round,
            price_before,
            market_price = self.market_price,
            shock,
            popped_this_round,
            "Round processed"
        );

        Ok(RoundReport {
            round: self.round,
            price_before,
            market_price: self.market_price,
            pressure,
            shock,
            popped_this_round,
            bubble_popped: self.bubble_popped,
            rounds_since_pop: self.rounds_since_pop,
        })
    }

    /// Participants ranked by cash, richest first.
    pub fn scores(&self) -> Vec<Score> {
        let mut scores: Vec<Score> = self
            .join_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .map(|p| Score(p.name.clone(), p.money))
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }

    /// Close the session for good and return the final ranking.
    pub fn end_game(&mut self) -> Vec<Score> {
        self.phase = GamePhase::Over;
        self.is_active = false;
        self.scores()
    }
}
