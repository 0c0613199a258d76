//! Toy housing-market price model.
//!
//! The price moves each round by the sum of four pressure terms plus a random
//! shock, all in percent. Randomness comes from a [`MarketDice`] so that rounds
//! can be replayed deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::domain::rules::{
    BASELINE_MORTGAGE_RATE, DEBT_COEFF, DEBT_NORMALIZER, MIN_MARKET_PRICE, RATE_PRESSURE_COEFF,
    SHOCK_RANGE, SPECULATION_COEFF, SUPPLY_DEMAND_COEFF,
};

/// Source of the two random draws a round needs.
pub trait MarketDice {
    /// Percent shock, uniform in `[-SHOCK_RANGE, SHOCK_RANGE]`.
    fn shock(&mut self) -> f64;
    /// Uniform in `[0, 1)`; the bubble pops when this is below the pop probability.
    fn pop_roll(&mut self) -> f64;
}

/// Production dice over a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shared RNG, also used for shuffling the role pool.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl MarketDice for RandomDice {
    fn shock(&mut self) -> f64 {
        self.rng.random_range(-SHOCK_RANGE..=SHOCK_RANGE)
    }

    fn pop_roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Dice that always return the same draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDice {
    pub shock: f64,
    pub pop_roll: f64,
}

impl FixedDice {
    /// No shock, bubble never pops.
    pub fn calm() -> Self {
        Self {
            shock: 0.0,
            pop_roll: 1.0,
        }
    }

    /// No shock, bubble pops as soon as the threshold is crossed.
    pub fn forced_pop() -> Self {
        Self {
            shock: 0.0,
            pop_roll: 0.0,
        }
    }
}

impl MarketDice for FixedDice {
    fn shock(&mut self) -> f64 {
        self.shock
    }

    fn pop_roll(&mut self) -> f64 {
        self.pop_roll
    }
}

/// Inputs to the pressure formula, gathered from game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    pub mortgage_rate: f64,
    /// Every registered participant, moderators included.
    pub players: usize,
    pub speculators: usize,
    pub properties: usize,
    pub outstanding_debt: f64,
}

/// The four additive pressure terms, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketPressure {
    pub rate: f64,
    pub speculation: f64,
    pub supply_demand: f64,
    pub debt: f64,
}

impl MarketPressure {
    pub fn from_inputs(inputs: &MarketInputs) -> Self {
        let rate = (inputs.mortgage_rate - BASELINE_MORTGAGE_RATE) * RATE_PRESSURE_COEFF;

        // Player-normalised terms vanish for an empty game.
        if inputs.players == 0 {
            return Self {
                rate,
                speculation: 0.0,
                supply_demand: 0.0,
                debt: 0.0,
            };
        }

        let players = inputs.players as f64;
        let speculation = (inputs.speculators as f64 / players) * SPECULATION_COEFF;
        let supply_demand = ((players - inputs.properties as f64) / players) * SUPPLY_DEMAND_COEFF;
        let debt = (inputs.outstanding_debt / (DEBT_NORMALIZER * players)) * DEBT_COEFF;

        Self {
            rate,
            speculation,
            supply_demand,
            debt,
        }
    }

    pub fn total(&self) -> f64 {
        self.rate + self.speculation + self.supply_demand + self.debt
    }
}

/// Apply a percent change multiplicatively, never dropping to zero or below.
pub fn adjust_price(price: f64, percent_change: f64) -> f64 {
    (price * (1.0 + percent_change / 100.0)).max(MIN_MARKET_PRICE)
}
