use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::payments::PaymentAllocation;

fn validate_balances(interest_owed: Money, remaining_capital: Money) -> Result<()> {
    if interest_owed.is_negative() {
        return Err(LedgerError::InvalidAmount {
            amount: interest_owed,
        });
    }
    if remaining_capital.is_negative() {
        return Err(LedgerError::InvalidAmount {
            amount: remaining_capital,
        });
    }
    Ok(())
}

/// split a payment between interest and capital
///
/// interest owed is serviced first; whatever is left reduces capital. a
/// total beyond the full outstanding obligation is rejected: there is no
/// concept of a credit balance carried forward
pub fn allocate(
    total: Money,
    interest_owed: Money,
    remaining_capital: Money,
) -> Result<PaymentAllocation> {
    if !total.is_positive() {
        return Err(LedgerError::InvalidAmount { amount: total });
    }
    validate_balances(interest_owed, remaining_capital)?;

    let maximum = interest_owed + remaining_capital;
    if total > maximum {
        return Err(LedgerError::Overpayment {
            requested: total,
            maximum,
        });
    }

    let interest_portion = total.min(interest_owed);
    let capital_portion = remaining_capital.min(total - interest_portion);

    Ok(PaymentAllocation {
        interest_portion,
        capital_portion,
    })
}

/// allocate a payment that settles the loan in full
///
/// the capital portion is pinned to the remaining capital; the rest of the
/// handed-over total is the interest portion, so the recorded split always
/// sums to the total
pub fn allocate_full_settlement(
    total: Money,
    interest_owed: Money,
    remaining_capital: Money,
) -> Result<PaymentAllocation> {
    if !total.is_positive() {
        return Err(LedgerError::InvalidAmount { amount: total });
    }
    validate_balances(interest_owed, remaining_capital)?;

    let interest_portion = total - remaining_capital;
    if interest_portion.is_negative() {
        // handed-over total cannot even cover the capital
        return Err(LedgerError::InvalidAmount { amount: total });
    }
    if interest_portion > interest_owed {
        return Err(LedgerError::Overpayment {
            requested: total,
            maximum: interest_owed + remaining_capital,
        });
    }

    Ok(PaymentAllocation {
        interest_portion,
        capital_portion: remaining_capital,
    })
}
