use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Participant role. `Moderator` is the TA who drives rounds and never acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Homebuyer,
    Developer,
    Speculator,
    MortgageLender,
    Banker,
    #[serde(rename = "ta")]
    Moderator,
}

/// The economic roles dealt to students, in pool order before shuffling.
pub const ECONOMIC_ROLES: [Role; 5] = [
    Role::Homebuyer,
    Role::Developer,
    Role::Speculator,
    Role::MortgageLender,
    Role::Banker,
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Homebuyer => "homebuyer",
            Role::Developer => "developer",
            Role::Speculator => "speculator",
            Role::MortgageLender => "mortgage_lender",
            Role::Banker => "banker",
            Role::Moderator => "ta",
        }
    }

    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Moderator)
    }

    /// Roles that buy and sell existing property.
    pub fn is_buyer(&self) -> bool {
        matches!(self, Role::Homebuyer | Role::Speculator)
    }

    /// Roles allowed to see the loan book.
    pub fn sees_loans(&self) -> bool {
        matches!(self, Role::Moderator | Role::Banker | Role::MortgageLender)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-shuffled multiset of role tokens, drawn down as students join.
///
/// Holds `ECONOMIC_ROLES` repeated `max_players / 5` times, so for a cap that
/// is not a multiple of five the pool runs dry before the cap is reached.
#[derive(Debug, Clone)]
pub struct RolePool {
    tokens: Vec<Role>,
    capacity: usize,
}

impl RolePool {
    pub fn shuffled<R: Rng + ?Sized>(max_players: usize, rng: &mut R) -> Self {
        let copies = max_players / ECONOMIC_ROLES.len();
        let mut tokens: Vec<Role> = ECONOMIC_ROLES
            .iter()
            .copied()
            .cycle()
            .take(copies * ECONOMIC_ROLES.len())
            .collect();
        tokens.shuffle(rng);
        let capacity = tokens.len();
        Self { tokens, capacity }
    }

    /// Take the next role token, if any remain.
    pub fn draw(&mut self) -> Option<Role> {
        self.tokens.pop()
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Size of the pool at creation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many tokens of `role` are still undealt.
    #[cfg(test)]
    pub fn remaining_of(&self, role: Role) -> usize {
        self.tokens.iter().filter(|r| **r == role).count()
    }
}
