//! remaining-capital and completion logic derived from a loan's payment history
//!
//! all functions expect the payment slice to contain only payments belonging
//! to the loan in question; callers fetch them through the store boundary

use chrono::{DateTime, Utc};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{Loan, LoanStatus, Payment, Period};

/// sum of the capital portions of all payments
pub fn capital_paid(payments: &[Payment]) -> Money {
    payments.iter().map(|p| p.capital_amount).sum()
}

/// principal minus cumulative capital repaid
///
/// not clamped: an over-paid loan reports a negative value here, and callers
/// decide how to treat it before accruing interest
pub fn remaining_capital(loan: &Loan, payments: &[Payment]) -> Money {
    loan.principal - capital_paid(payments)
}

/// a loan is completed when it carries an explicit end date or its capital
/// has been fully repaid
pub fn is_completed(loan: &Loan, remaining_capital: Money) -> bool {
    loan.is_completed() || remaining_capital <= Money::ZERO
}

/// derived status, Active -> Completed is terminal
pub fn status(loan: &Loan, remaining_capital: Money) -> LoanStatus {
    if is_completed(loan, remaining_capital) {
        LoanStatus::Completed
    } else {
        LoanStatus::Active
    }
}

/// the most recent payment, ordered by date with the payment id as a
/// deterministic tie-break
pub fn last_payment(payments: &[Payment]) -> Option<&Payment> {
    payments.iter().max_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.id.cmp(&b.id))
    })
}

/// the instant interest accrues from: the last payment date, or the loan
/// start date when nothing has been paid yet
pub fn reference_date_for_accrual(loan: &Loan, payments: &[Payment]) -> DateTime<Utc> {
    last_payment(payments)
        .map(|p| p.date)
        .unwrap_or(loan.start_date)
}

/// whether more than one full period has elapsed since the reference date
pub fn is_overdue(reference: DateTime<Utc>, as_of: DateTime<Utc>, period: Period) -> bool {
    let days = (as_of - reference).num_days().max(0) as u32;
    days > period.grace_days()
}

/// mark the loan as settled
///
/// the transition is exactly-once; completing an already-completed loan is
/// an error
pub fn complete(loan: &mut Loan, as_of: DateTime<Utc>) -> Result<()> {
    if loan.is_completed() {
        return Err(LedgerError::LoanAlreadyCompleted {
            id: loan.id.clone(),
        });
    }
    loan.end_date = Some(as_of);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use chrono::{Duration, TimeZone};

    fn loan() -> Loan {
        Loan {
            id: "loan-1".to_string(),
            client_id: "client-1".to_string(),
            principal: Money::from_major(1000),
            rate: Rate::from_percentage(10),
            start_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            end_date: None,
        }
    }

    fn payment(id: &str, capital: i64, interest: i64, days_after_start: i64) -> Payment {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        Payment {
            id: id.to_string(),
            client_id: "client-1".to_string(),
            loan_id: "loan-1".to_string(),
            capital_amount: Money::from_major(capital),
            interest_amount: Money::from_major(interest),
            date: start + Duration::days(days_after_start),
        }
    }

    #[test]
    fn test_remaining_capital() {
        let loan = loan();
        let payments = vec![payment("p1", 200, 30, 14), payment("p2", 300, 20, 28)];

        assert_eq!(capital_paid(&payments), Money::from_major(500));
        assert_eq!(remaining_capital(&loan, &payments), Money::from_major(500));
    }

    #[test]
    fn test_remaining_capital_reaches_exact_zero() {
        let loan = loan();
        let payments = vec![payment("p1", 400, 40, 14), payment("p2", 600, 15, 28)];

        let remaining = remaining_capital(&loan, &payments);
        assert_eq!(remaining, Money::ZERO);
        assert!(is_completed(&loan, remaining));
        assert_eq!(status(&loan, remaining), LoanStatus::Completed);
    }

    #[test]
    fn test_remaining_capital_not_clamped() {
        let loan = loan();
        let payments = vec![payment("p1", 1200, 0, 14)];

        assert_eq!(remaining_capital(&loan, &payments), Money::from_major(-200));
    }

    #[test]
    fn test_completed_by_end_date_regardless_of_capital() {
        let mut loan = loan();
        loan.end_date = Some(loan.start_date + Duration::days(60));

        assert!(is_completed(&loan, Money::from_major(400)));
    }

    #[test]
    fn test_reference_date_falls_back_to_start() {
        let loan = loan();
        assert_eq!(reference_date_for_accrual(&loan, &[]), loan.start_date);
    }

    #[test]
    fn test_reference_date_is_latest_payment() {
        let loan = loan();
        let payments = vec![payment("p2", 100, 10, 28), payment("p1", 100, 10, 14)];

        let reference = reference_date_for_accrual(&loan, &payments);
        assert_eq!(reference, loan.start_date + Duration::days(28));
    }

    #[test]
    fn test_last_payment_tie_break_on_id() {
        let payments = vec![payment("p1", 100, 10, 14), payment("p2", 50, 5, 14)];

        // same instant: the greater id wins, deterministically
        assert_eq!(last_payment(&payments).unwrap().id, "p2");

        let reversed = vec![payment("p2", 50, 5, 14), payment("p1", 100, 10, 14)];
        assert_eq!(last_payment(&reversed).unwrap().id, "p2");
    }

    #[test]
    fn test_overdue_after_one_full_period() {
        let reference = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        for (period, limit) in [
            (Period::Monthly, 31),
            (Period::Biweekly, 16),
            (Period::FourteenDay, 15),
        ] {
            let at_limit = reference + Duration::days(limit);
            let past_limit = reference + Duration::days(limit + 1);
            assert!(!is_overdue(reference, at_limit, period));
            assert!(is_overdue(reference, past_limit, period));
        }
    }

    #[test]
    fn test_complete_is_exactly_once() {
        let mut loan = loan();
        let as_of = loan.start_date + Duration::days(30);

        complete(&mut loan, as_of).unwrap();
        assert_eq!(loan.end_date, Some(as_of));

        let err = complete(&mut loan, as_of + Duration::days(1)).unwrap_err();
        assert!(matches!(err, LedgerError::LoanAlreadyCompleted { ref id } if id == "loan-1"));
        assert_eq!(loan.end_date, Some(as_of));
    }
}
