use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info};

use crate::dashboard::{self, DashboardSummary, PeriodWindow};
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::interest::AccrualEngine;
use crate::ledger;
use crate::payments::{allocate, allocate_full_settlement};
use crate::store::LendingStore;
use crate::types::{NewPayment, Payment, Period};

/// what a borrower currently owes on a loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obligation {
    pub interest_owed: Money,
    pub remaining_capital: Money,
    pub reference_date: DateTime<Utc>,
}

impl Obligation {
    /// the largest payment the loan can accept
    pub fn total_outstanding(&self) -> Money {
        self.interest_owed + self.remaining_capital.clamp_non_negative()
    }
}

/// aggregate position of one client across their active loans
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFinancialSummary {
    pub total_pending_interest: Money,
    pub total_remaining_capital: Money,
    pub last_payment_date: Option<DateTime<Utc>>,
    /// active loans with more than one full period since the last payment
    pub overdue_loans: u32,
}

/// operations exposed to the presentation layer
///
/// owns the store handle; every reading of "now" comes from the injected
/// time provider, never the system clock
pub struct LendingTracker<S> {
    store: S,
    events: EventStore,
}

impl<S: LendingStore> LendingTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            events: EventStore::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// drain events collected by mutating operations
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// interest owed and capital remaining on a loan as of now
    ///
    /// completed loans stop accruing: their interest owed is always zero
    pub fn current_obligation(
        &self,
        loan_id: &str,
        period: Period,
        time: &SafeTimeProvider,
    ) -> Result<Obligation> {
        let loan = self.store.loan(loan_id)?;
        let payments = self.store.payments_for_loan(loan_id)?;

        let remaining_capital = ledger::remaining_capital(&loan, &payments);
        let reference_date = ledger::reference_date_for_accrual(&loan, &payments);

        let interest_owed = if loan.is_completed() {
            Money::ZERO
        } else {
            AccrualEngine::new(period).accrued_interest(
                remaining_capital,
                loan.rate,
                reference_date,
                time.now(),
            )
        };

        debug!(
            loan_id,
            %interest_owed,
            %remaining_capital,
            "computed current obligation"
        );

        Ok(Obligation {
            interest_owed,
            remaining_capital,
            reference_date,
        })
    }

    /// record a payment against a loan
    ///
    /// allocates interest before capital, persists the split, and marks the
    /// loan completed when the capital portion clears the remaining capital.
    /// all validation happens before anything is written, so a failed
    /// submission leaves no partial record; if completion fails after the
    /// payment was created the store error surfaces for the caller to
    /// compensate
    pub fn submit_payment(
        &mut self,
        loan_id: &str,
        total: Money,
        full_settlement: bool,
        time: &SafeTimeProvider,
    ) -> Result<Payment> {
        let loan = self.store.loan(loan_id)?;
        let payments = self.store.payments_for_loan(loan_id)?;

        let remaining_capital = ledger::remaining_capital(&loan, &payments);
        if ledger::is_completed(&loan, remaining_capital) {
            return Err(LedgerError::LoanAlreadyCompleted { id: loan.id });
        }

        let client = self.store.client(&loan.client_id)?;
        let now = time.now();
        let reference_date = ledger::reference_date_for_accrual(&loan, &payments);
        let interest_owed = AccrualEngine::new(client.period).accrued_interest(
            remaining_capital,
            loan.rate,
            reference_date,
            now,
        );

        let allocation = if full_settlement {
            allocate_full_settlement(total, interest_owed, remaining_capital)?
        } else {
            allocate(total, interest_owed, remaining_capital)?
        };

        let payment = self.store.create_payment(NewPayment {
            client_id: loan.client_id.clone(),
            loan_id: loan.id.clone(),
            capital_amount: allocation.capital_portion,
            interest_amount: allocation.interest_portion,
            date: now,
        })?;

        info!(
            loan_id,
            interest = %allocation.interest_portion,
            capital = %allocation.capital_portion,
            "payment recorded"
        );

        self.events.emit(Event::PaymentRecorded {
            payment_id: payment.id.clone(),
            loan_id: loan.id.clone(),
            client_id: loan.client_id.clone(),
            interest_portion: allocation.interest_portion,
            capital_portion: allocation.capital_portion,
            timestamp: now,
        });

        if allocation.settles(remaining_capital) {
            self.store.mark_loan_completed(&loan.id, now)?;

            info!(loan_id, "loan fully settled");

            self.events.emit(Event::LoanCompleted {
                loan_id: loan.id.clone(),
                client_id: loan.client_id.clone(),
                final_payment: payment.total(),
                timestamp: now,
            });
        }

        Ok(payment)
    }

    /// aggregate all payments falling inside the window
    pub fn dashboard_summary(
        &self,
        window: PeriodWindow,
        time: &SafeTimeProvider,
    ) -> Result<DashboardSummary> {
        let payments = self.store.all_payments()?;
        let clients = self.store.clients()?;
        Ok(dashboard::summarize(&payments, &clients, window, time.now()))
    }

    /// aggregate a client's position over their active loans
    pub fn client_financial_summary(
        &self,
        client_id: &str,
        time: &SafeTimeProvider,
    ) -> Result<ClientFinancialSummary> {
        let client = self.store.client(client_id)?;
        let now = time.now();
        let engine = AccrualEngine::new(client.period);

        let mut total_pending_interest = Money::ZERO;
        let mut total_remaining_capital = Money::ZERO;
        let mut last_payment_date: Option<DateTime<Utc>> = None;
        let mut overdue_loans = 0;

        for loan in self
            .store
            .loans_for_client(client_id)?
            .iter()
            .filter(|l| !l.is_completed())
        {
            let payments = self.store.payments_for_loan(&loan.id)?;

            let remaining_capital = ledger::remaining_capital(loan, &payments);
            let reference_date = ledger::reference_date_for_accrual(loan, &payments);

            total_pending_interest +=
                engine.accrued_interest(remaining_capital, loan.rate, reference_date, now);
            total_remaining_capital += remaining_capital;

            if let Some(payment) = ledger::last_payment(&payments) {
                last_payment_date = Some(match last_payment_date {
                    Some(existing) => existing.max(payment.date),
                    None => payment.date,
                });
            }

            if ledger::is_overdue(reference_date, now, client.period) {
                overdue_loans += 1;
            }
        }

        Ok(ClientFinancialSummary {
            total_pending_interest,
            total_remaining_capital,
            last_payment_date,
            overdue_loans,
        })
    }
}
