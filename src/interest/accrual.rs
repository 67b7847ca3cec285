use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::interest::InterestCalculation;
use crate::types::Period;

/// engine for accruing simple interest at a per-period rate
///
/// the nominal rate applies per amortization period; the daily rate is the
/// nominal rate divided by the period's day count
pub struct AccrualEngine {
    pub period: Period,
    clamp_negative_capital: bool,
}

impl AccrualEngine {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            clamp_negative_capital: true,
        }
    }

    /// let an over-paid (negative) capital base accrue negative interest
    /// instead of clamping it at zero
    pub fn with_negative_capital_accrual(mut self) -> Self {
        self.clamp_negative_capital = false;
        self
    }

    /// whole days elapsed between two instants, floored, never negative
    pub fn elapsed_days(&self, reference: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
        (as_of - reference).num_days().max(0) as u32
    }

    /// daily rate derived from the nominal per-period rate
    pub fn daily_rate(&self, rate: Rate) -> Rate {
        rate.per_day(self.period.days())
    }

    /// interest owed on the remaining capital as of a given instant
    ///
    /// `reference` is the last payment date, or the loan start date when no
    /// payment has been made
    pub fn accrue(
        &self,
        remaining_capital: Money,
        rate: Rate,
        reference: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> InterestCalculation {
        let days = self.elapsed_days(reference, as_of);
        let daily_rate = self.daily_rate(rate);

        let capital_base = if self.clamp_negative_capital {
            remaining_capital.clamp_non_negative()
        } else {
            remaining_capital
        };

        let interest = capital_base.as_decimal() * daily_rate.as_decimal() * Decimal::from(days);

        InterestCalculation {
            interest_amount: Money::from_decimal(interest),
            daily_rate,
            days,
            capital_base,
            period: self.period,
        }
    }

    /// convenience wrapper returning only the interest amount
    pub fn accrued_interest(
        &self,
        remaining_capital: Money,
        rate: Rate,
        reference: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> Money {
        self.accrue(remaining_capital, rate, reference, as_of)
            .interest_amount
    }
}
