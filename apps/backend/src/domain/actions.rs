//! Per-role player actions and their validation.
//!
//! Every action is validated in full before any state changes, so a rejected
//! action leaves the game exactly as it was.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::game::Game;
use crate::domain::loan::LoanId;
use crate::domain::player::ConnectionId;
use crate::domain::property::{Location, PropertyId};
use crate::domain::roles::Role;
use crate::domain::rules::{
    build_cost, BANK_LOAN_TERM, BANK_RATE_RANGE, MORTGAGE_RATE_RANGE, MORTGAGE_TERM,
    QUALITY_RANGE,
};
use crate::errors::domain::DomainError;

/// A player move, adjacently tagged as `{action_type, action_data}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", content = "action_data", rename_all = "snake_case")]
pub enum PlayerAction {
    SetBankRate {
        rate: f64,
    },
    LendToBank {
        target_bank: ConnectionId,
        amount: f64,
    },
    OfferMortgage {
        borrower_id: ConnectionId,
        amount: f64,
        rate: f64,
    },
    BuildHouse {
        location: Location,
        quality: u8,
    },
    BuyProperty {
        property_id: PropertyId,
    },
    SellProperty {
        property_id: PropertyId,
    },
}

impl PlayerAction {
    /// Build an action from the loose `action_type` / `action_data` pair a
    /// client sends. Anything that does not decode is an invalid action.
    pub fn from_parts(action_type: &str, action_data: Value) -> Result<Self, DomainError> {
        let tagged = serde_json::json!({
            "action_type": action_type,
            "action_data": action_data,
        });
        serde_json::from_value(tagged)
            .map_err(|e| DomainError::invalid_action(format!("Invalid action: {e}")))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlayerAction::SetBankRate { .. } => "set_bank_rate",
            PlayerAction::LendToBank { .. } => "lend_to_bank",
            PlayerAction::OfferMortgage { .. } => "offer_mortgage",
            PlayerAction::BuildHouse { .. } => "build_house",
            PlayerAction::BuyProperty { .. } => "buy_property",
            PlayerAction::SellProperty { .. } => "sell_property",
        }
    }
}

/// What the acting player is told after a successful action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReceipt {
    pub message: String,
    pub new_balance: f64,
}

fn require_positive_amount(amount: f64) -> Result<(), DomainError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_action("Amount must be a positive number"))
    }
}

fn require_affordable(cost: f64, cash: f64) -> Result<(), DomainError> {
    if cost <= cash {
        Ok(())
    } else {
        Err(DomainError::invalid_action("Insufficient funds"))
    }
}

impl Game {
    /// The actor must be a participant, the game must not be over and the
    /// actor must still owe an action this round.
    pub fn ensure_can_act(&self, actor: &ConnectionId) -> Result<Role, DomainError> {
        let role = self.require_player(actor)?.role;
        self.ensure_not_over()?;
        if !self.is_waiting_on(actor) {
            return Err(DomainError::AlreadyActed);
        }
        Ok(role)
    }

    /// Validate and apply one action for `actor`: first `ensure_can_act`,
    /// then the role/action pairing and its constraints.
    pub fn apply_action(
        &mut self,
        actor: ConnectionId,
        action: &PlayerAction,
    ) -> Result<ActionReceipt, DomainError> {
        let role = self.ensure_can_act(&actor)?;

        let message = match (role, action) {
            (Role::Banker, PlayerAction::SetBankRate { rate }) => self.set_bank_rate(*rate)?,
            (
                Role::Banker,
                PlayerAction::LendToBank {
                    target_bank,
                    amount,
                },
            ) => self.lend_to_bank(actor, *target_bank, *amount)?,
            (
                Role::MortgageLender,
                PlayerAction::OfferMortgage {
                    borrower_id,
                    amount,
                    rate,
                },
            ) => self.offer_mortgage(actor, *borrower_id, *amount, *rate)?,
            (Role::Developer, PlayerAction::BuildHouse { location, quality }) => {
                self.build_house(actor, *location, *quality)?
            }
            (role, PlayerAction::BuyProperty { property_id }) if role.is_buyer() => {
                self.buy_property(actor, *property_id)?
            }
            (role, PlayerAction::SellProperty { property_id }) if role.is_buyer() => {
                self.sell_property(actor, *property_id)?
            }
            (role, action) => {
                return Err(DomainError::invalid_action(format!(
                    "Invalid action: {role} cannot {}",
                    action.kind()
                )))
            }
        };

        self.waiting_for_actions.remove(&actor);
        let player = self
            .players
            .get_mut(&actor)
            .ok_or_else(DomainError::player_not_found)?;
        player.actions_taken += 1;

        Ok(ActionReceipt {
            message,
            new_balance: player.money,
        })
    }

    fn cash_of(&self, id: &ConnectionId) -> Result<f64, DomainError> {
        Ok(self.require_player(id)?.money)
    }

    fn set_bank_rate(&mut self, rate: f64) -> Result<String, DomainError> {
        if !BANK_RATE_RANGE.contains(&rate) {
            return Err(DomainError::invalid_action(
                "Bank rate must be between 0 and 15%",
            ));
        }
        self.interest_rates.bank = rate;
        Ok(format!("Bank-to-bank rate set to {rate}%"))
    }

    fn lend_to_bank(
        &mut self,
        lender: ConnectionId,
        target: ConnectionId,
        amount: f64,
    ) -> Result<String, DomainError> {
        require_positive_amount(amount)?;
        require_affordable(amount, self.cash_of(&lender)?)?;
        if target == lender {
            return Err(DomainError::invalid_action("Cannot lend to yourself"));
        }
        match self.player(&target) {
            Some(p) if p.role == Role::Banker => {}
            _ => return Err(DomainError::invalid_action("Target is not a bank")),
        }

        let rate = self.interest_rates.bank;
        let loan_id = self.create_loan(lender, target, amount, rate, BANK_LOAN_TERM);
        self.move_cash(lender, target, amount, loan_id);
        Ok(format!("Lent ${amount:.2} to bank at {rate}% interest"))
    }

    fn offer_mortgage(
        &mut self,
        lender: ConnectionId,
        borrower: ConnectionId,
        amount: f64,
        rate: f64,
    ) -> Result<String, DomainError> {
        require_positive_amount(amount)?;
        require_affordable(amount, self.cash_of(&lender)?)?;
        if !MORTGAGE_RATE_RANGE.contains(&rate) {
            return Err(DomainError::invalid_action(
                "Mortgage rate must be between 0 and 20%",
            ));
        }
        if borrower == lender {
            return Err(DomainError::invalid_action("Cannot lend to yourself"));
        }
        match self.player(&borrower) {
            Some(p) if !p.role.is_moderator() => {}
            _ => return Err(DomainError::invalid_action("Unknown borrower")),
        }

        let loan_id = self.create_loan(lender, borrower, amount, rate, MORTGAGE_TERM);
        self.move_cash(lender, borrower, amount, loan_id);
        Ok(format!("Offered ${amount:.2} mortgage at {rate}% interest"))
    }

    /// Both parties must exist; callers validate before calling.
    fn move_cash(
        &mut self,
        lender: ConnectionId,
        borrower: ConnectionId,
        amount: f64,
        loan_id: LoanId,
    ) {
        if let Some(p) = self.players.get_mut(&lender) {
            p.money -= amount;
            p.loans.push(loan_id);
        }
        if let Some(p) = self.players.get_mut(&borrower) {
            p.money += amount;
            p.loans.push(loan_id);
        }
    }

    fn build_house(
        &mut self,
        developer: ConnectionId,
        location: Location,
        quality: u8,
    ) -> Result<String, DomainError> {
        if !QUALITY_RANGE.contains(&quality) {
            return Err(DomainError::invalid_action(
                "Quality must be between 1 and 10",
            ));
        }
        let cost = build_cost(quality);
        require_affordable(cost, self.cash_of(&developer)?)?;

        let property_id = self.create_property(location, quality);
        if let Some(property) = self.properties.get_mut(property_id) {
            property.owner = Some(developer);
        }
        if let Some(p) = self.players.get_mut(&developer) {
            p.money -= cost;
            p.properties.push(property_id);
        }
        Ok(format!("Built new {quality}-quality house in {location}"))
    }

    fn buy_property(
        &mut self,
        buyer: ConnectionId,
        property_id: PropertyId,
    ) -> Result<String, DomainError> {
        let property = self
            .properties
            .get(property_id)
            .ok_or_else(|| DomainError::invalid_action("Property does not exist"))?;
        if property.owner.is_some() {
            return Err(DomainError::invalid_action("Property is already owned"));
        }
        let price = property.current_value;
        require_affordable(price, self.cash_of(&buyer)?)?;

        if let Some(property) = self.properties.get_mut(property_id) {
            property.owner = Some(buyer);
        }
        if let Some(p) = self.players.get_mut(&buyer) {
            p.money -= price;
            p.properties.push(property_id);
        }
        Ok(format!("Bought property for ${price:.2}"))
    }

    fn sell_property(
        &mut self,
        seller: ConnectionId,
        property_id: PropertyId,
    ) -> Result<String, DomainError> {
        if !self.require_player(&seller)?.owns(property_id) {
            return Err(DomainError::invalid_action("You do not own that property"));
        }
        let property = self
            .properties
            .get_mut(property_id)
            .ok_or_else(|| DomainError::invalid_action("Property does not exist"))?;
        let price = property.current_value;
        property.owner = None;

        if let Some(p) = self.players.get_mut(&seller) {
            p.money += price;
            p.properties.retain(|id| *id != property_id);
        }
        Ok(format!("Sold property for ${price:.2}"))
    }
}
