use serde::Serialize;

use crate::domain::player::ConnectionId;

pub type LoanId = usize;

/// Only `Active` is produced today; repayment and default are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Repaid,
    Defaulted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    pub id: LoanId,
    pub lender_id: ConnectionId,
    pub borrower_id: ConnectionId,
    pub original_amount: f64,
    pub remaining_amount: f64,
    pub interest_rate: f64,
    pub term: u32,
    pub payments_made: u32,
    pub status: LoanStatus,
}

impl Loan {
    pub fn open(
        id: LoanId,
        lender_id: ConnectionId,
        borrower_id: ConnectionId,
        amount: f64,
        interest_rate: f64,
        term: u32,
    ) -> Self {
        Self {
            id,
            lender_id,
            borrower_id,
            original_amount: amount,
            remaining_amount: amount,
            interest_rate,
            term,
            payments_made: 0,
            status: LoanStatus::Active,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.status == LoanStatus::Active
    }
}
