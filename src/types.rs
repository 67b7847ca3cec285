use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// store-assigned opaque identifiers
pub type ClientId = String;
pub type LoanId = String;
pub type PaymentId = String;

/// amortization period: the cadence at which the nominal rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    /// 30-day month
    #[serde(alias = "mensual")]
    Monthly,
    /// 15-day half month
    #[serde(alias = "quincenal")]
    Biweekly,
    /// 14-day cycle
    #[serde(alias = "catorcenal")]
    FourteenDay,
}

impl Period {
    /// parse a stored period label
    ///
    /// accepts the canonical labels plus the legacy spanish ones found in
    /// older client records
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "monthly" | "mensual" => Ok(Period::Monthly),
            "biweekly" | "quincenal" => Ok(Period::Biweekly),
            "fourteen-day" | "catorcenal" => Ok(Period::FourteenDay),
            other => Err(LedgerError::UnsupportedPeriod {
                label: other.to_string(),
            }),
        }
    }

    /// canonical label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Biweekly => "biweekly",
            Period::FourteenDay => "fourteen-day",
        }
    }

    /// day-count divisor used to derive the daily rate
    pub fn days(&self) -> u32 {
        match self {
            Period::Monthly => 30,
            Period::Biweekly => 15,
            Period::FourteenDay => 14,
        }
    }

    /// days after which a loan with no payment is considered overdue
    pub fn grace_days(&self) -> u32 {
        self.days() + 1
    }
}

impl std::str::FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Period::parse(s)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// a borrower
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub period: Period,
}

/// a principal amount lent to a client, accruing periodic interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub client_id: ClientId,
    pub principal: Money,
    /// nominal rate per amortization period
    pub rate: Rate,
    pub start_date: DateTime<Utc>,
    /// set once when the loan is fully settled; completed loans accrue no
    /// further interest and accept no further payments
    pub end_date: Option<DateTime<Utc>>,
}

impl Loan {
    /// whether the loan record carries an explicit completion timestamp
    pub fn is_completed(&self) -> bool {
        self.end_date.is_some()
    }
}

/// derived loan state, Active -> Completed is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Completed,
}

/// an amount handed over by the borrower, split between interest and capital
///
/// payments are append-only; the split is fixed at recording time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub client_id: ClientId,
    pub loan_id: LoanId,
    pub capital_amount: Money,
    pub interest_amount: Money,
    pub date: DateTime<Utc>,
}

impl Payment {
    /// total amount the borrower handed over
    pub fn total(&self) -> Money {
        self.capital_amount + self.interest_amount
    }
}

/// a payment before the store has assigned it an identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub client_id: ClientId,
    pub loan_id: LoanId,
    pub capital_amount: Money,
    pub interest_amount: Money,
    pub date: DateTime<Utc>,
}

impl NewPayment {
    pub fn total(&self) -> Money {
        self.capital_amount + self.interest_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_days() {
        assert_eq!(Period::Monthly.days(), 30);
        assert_eq!(Period::Biweekly.days(), 15);
        assert_eq!(Period::FourteenDay.days(), 14);
    }

    #[test]
    fn test_period_grace_days() {
        assert_eq!(Period::Monthly.grace_days(), 31);
        assert_eq!(Period::Biweekly.grace_days(), 16);
        assert_eq!(Period::FourteenDay.grace_days(), 15);
    }

    #[test]
    fn test_period_parse_canonical_and_legacy() {
        assert_eq!(Period::parse("monthly").unwrap(), Period::Monthly);
        assert_eq!(Period::parse("mensual").unwrap(), Period::Monthly);
        assert_eq!(Period::parse("biweekly").unwrap(), Period::Biweekly);
        assert_eq!(Period::parse("quincenal").unwrap(), Period::Biweekly);
        assert_eq!(Period::parse("fourteen-day").unwrap(), Period::FourteenDay);
        assert_eq!(Period::parse("catorcenal").unwrap(), Period::FourteenDay);
    }

    #[test]
    fn test_period_parse_rejects_unknown() {
        let err = Period::parse("weekly").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::UnsupportedPeriod { ref label } if label == "weekly"
        ));
    }

    #[test]
    fn test_loan_serde_round_trip() {
        let loan = Loan {
            id: "loan-1".to_string(),
            client_id: "client-1".to_string(),
            principal: Money::from_major(1000),
            rate: Rate::from_percentage(10),
            start_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            end_date: None,
        };

        let json = serde_json::to_string(&loan).unwrap();
        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
        assert!(!back.is_completed());
    }

    #[test]
    fn test_payment_total() {
        let payment = Payment {
            id: "pay-1".to_string(),
            client_id: "client-1".to_string(),
            loan_id: "loan-1".to_string(),
            capital_amount: Money::from_major(150),
            interest_amount: Money::from_major(50),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
        };
        assert_eq!(payment.total(), Money::from_major(200));
    }

    #[test]
    fn test_period_serde_accepts_legacy_labels() {
        let period: Period = serde_json::from_str("\"quincenal\"").unwrap();
        assert_eq!(period, Period::Biweekly);
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"biweekly\"");
    }
}
