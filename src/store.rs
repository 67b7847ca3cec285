use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::ledger;
use crate::types::{Client, Loan, NewPayment, Payment, Period};

/// document-store boundary
///
/// the hosted backend serializes exactly the record shapes in `types`; the
/// core never sees store-specific metadata fields. implementations surface
/// their transport failures as `LedgerError::Store`
pub trait LendingStore {
    fn client(&self, id: &str) -> Result<Client>;
    fn clients(&self) -> Result<Vec<Client>>;
    fn loan(&self, id: &str) -> Result<Loan>;
    fn loans_for_client(&self, client_id: &str) -> Result<Vec<Loan>>;
    /// loans with no completion timestamp
    fn active_loans(&self) -> Result<Vec<Loan>>;
    fn payments_for_loan(&self, loan_id: &str) -> Result<Vec<Payment>>;
    fn all_payments(&self) -> Result<Vec<Payment>>;
    /// persist a payment, assigning its identity
    fn create_payment(&mut self, payment: NewPayment) -> Result<Payment>;
    fn mark_loan_completed(&mut self, loan_id: &str, completed_at: DateTime<Utc>) -> Result<()>;
}

/// in-memory store used by tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    clients: Vec<Client>,
    loans: Vec<Loan>,
    payments: Vec<Payment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_client(&mut self, name: &str, address: &str, phone: &str, period: Period) -> Client {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            period,
        };
        self.clients.push(client.clone());
        client
    }

    pub fn insert_loan(
        &mut self,
        client_id: &str,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
    ) -> Result<Loan> {
        // loans must reference a known client
        self.client(client_id)?;

        let loan = Loan {
            id: Uuid::new_v4().to_string(),
            client_id: client_id.to_string(),
            principal,
            rate,
            start_date,
            end_date: None,
        };
        self.loans.push(loan.clone());
        Ok(loan)
    }
}

impl LendingStore for MemoryStore {
    fn client(&self, id: &str) -> Result<Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::ClientNotFound { id: id.to_string() })
    }

    fn clients(&self) -> Result<Vec<Client>> {
        Ok(self.clients.clone())
    }

    fn loan(&self, id: &str) -> Result<Loan> {
        self.loans
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::LoanNotFound { id: id.to_string() })
    }

    fn loans_for_client(&self, client_id: &str) -> Result<Vec<Loan>> {
        Ok(self
            .loans
            .iter()
            .filter(|l| l.client_id == client_id)
            .cloned()
            .collect())
    }

    fn active_loans(&self) -> Result<Vec<Loan>> {
        Ok(self
            .loans
            .iter()
            .filter(|l| !l.is_completed())
            .cloned()
            .collect())
    }

    fn payments_for_loan(&self, loan_id: &str) -> Result<Vec<Payment>> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.loan_id == loan_id)
            .cloned()
            .collect())
    }

    fn all_payments(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.clone())
    }

    fn create_payment(&mut self, payment: NewPayment) -> Result<Payment> {
        // reject dangling references instead of storing them
        self.loan(&payment.loan_id)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            client_id: payment.client_id,
            loan_id: payment.loan_id,
            capital_amount: payment.capital_amount,
            interest_amount: payment.interest_amount,
            date: payment.date,
        };
        self.payments.push(payment.clone());
        Ok(payment)
    }

    fn mark_loan_completed(&mut self, loan_id: &str, completed_at: DateTime<Utc>) -> Result<()> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.id == loan_id)
            .ok_or_else(|| LedgerError::LoanNotFound {
                id: loan_id.to_string(),
            })?;

        ledger::complete(loan, completed_at)
    }
}
