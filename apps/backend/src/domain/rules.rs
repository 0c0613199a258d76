//! Fixed economic constants and the per-session admission rules.

use std::ops::RangeInclusive;

/// Market price every valuation is scaled against.
pub const BASE_MARKET_PRICE: f64 = 100.0;
/// Mortgage rate at which rate pressure is neutral.
pub const BASELINE_MORTGAGE_RATE: f64 = 5.0;
pub const STARTING_MORTGAGE_RATE: f64 = 5.0;
pub const STARTING_BANK_RATE: f64 = 3.0;

pub const RATE_PRESSURE_COEFF: f64 = -2.0;
pub const SPECULATION_COEFF: f64 = 10.0;
pub const SUPPLY_DEMAND_COEFF: f64 = 5.0;
pub const DEBT_COEFF: f64 = 3.0;
/// Outstanding debt is normalised per player by this amount.
pub const DEBT_NORMALIZER: f64 = 1000.0;

/// Random shock is uniform in `[-SHOCK_RANGE, SHOCK_RANGE]` percent.
pub const SHOCK_RANGE: f64 = 5.0;
pub const BUBBLE_THRESHOLD: f64 = 300.0;
pub const POP_PROBABILITY: f64 = 0.2;
pub const POP_SHRINK_FACTOR: f64 = 0.5;
/// Declared by the classroom rules but no rule consumes it yet.
pub const ROUNDS_AFTER_POP: u32 = 5;
/// Keeps `market_price > 0` even under absurd pressure sums.
pub const MIN_MARKET_PRICE: f64 = 0.01;

pub const BUILD_COST_PER_QUALITY: f64 = 50.0;
pub const QUALITY_RANGE: RangeInclusive<u8> = 1..=10;
pub const BANK_RATE_RANGE: RangeInclusive<f64> = 0.0..=15.0;
pub const MORTGAGE_RATE_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const BANK_LOAN_TERM: u32 = 12;
pub const MORTGAGE_TERM: u32 = 30;

pub const DEFAULT_MAX_PLAYERS: usize = 50;
pub const STARTING_CASH: f64 = 1000.0;
pub const STARTING_CREDIT_SCORE: u32 = 700;

/// Admission rules for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    /// Participant cap, moderators included.
    pub max_players: usize,
    pub starting_cash: f64,
    pub starting_credit_score: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            starting_cash: STARTING_CASH,
            starting_credit_score: STARTING_CREDIT_SCORE,
        }
    }
}

impl GameRules {
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }
}

/// Cost for a developer to build a house of the given quality.
pub fn build_cost(quality: u8) -> f64 {
    f64::from(quality) * BUILD_COST_PER_QUALITY
}
