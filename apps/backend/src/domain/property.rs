use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::loan::LoanId;
use crate::domain::player::ConnectionId;
use crate::domain::rules::BASE_MARKET_PRICE;

pub type PropertyId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Suburban,
    Urban,
    Prime,
}

impl Location {
    pub fn multiplier(&self) -> f64 {
        match self {
            Location::Suburban => 1.0,
            Location::Urban => 1.5,
            Location::Prime => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Suburban => "suburban",
            Location::Urban => "urban",
            Location::Prime => "prime",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub location: Location,
    pub quality: u8,
    /// Fixed at creation from quality and location.
    pub base_value: f64,
    pub current_value: f64,
    pub owner: Option<ConnectionId>,
    pub mortgage: Option<LoanId>,
}

impl Property {
    pub fn new(id: PropertyId, location: Location, quality: u8, market_price: f64) -> Self {
        let base_value = base_value(location, quality);
        Self {
            id,
            location,
            quality,
            base_value,
            current_value: valuation(base_value, market_price),
            owner: None,
            mortgage: None,
        }
    }

    pub fn revalue(&mut self, market_price: f64) {
        self.current_value = valuation(self.base_value, market_price);
    }
}

/// `100 * (1 + quality / 10)` scaled by the location multiplier.
pub fn base_value(location: Location, quality: u8) -> f64 {
    BASE_MARKET_PRICE * (1.0 + f64::from(quality) / 10.0) * location.multiplier()
}

pub fn valuation(base_value: f64, market_price: f64) -> f64 {
    base_value * (market_price / BASE_MARKET_PRICE)
}
