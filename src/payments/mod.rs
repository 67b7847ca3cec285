pub mod allocation;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use allocation::{allocate, allocate_full_settlement};

/// how a payment splits between interest and capital
///
/// interest is always serviced before capital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentAllocation {
    pub interest_portion: Money,
    pub capital_portion: Money,
}

impl PaymentAllocation {
    /// total amount applied
    pub fn total(&self) -> Money {
        self.interest_portion + self.capital_portion
    }

    /// whether this allocation clears the loan's remaining capital
    pub fn settles(&self, remaining_capital: Money) -> bool {
        self.capital_portion >= remaining_capital
    }
}
