pub mod accrual;

use crate::decimal::{Money, Rate};
use crate::types::Period;

pub use accrual::AccrualEngine;

/// interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: u32,
    pub capital_base: Money,
    pub period: Period,
}
