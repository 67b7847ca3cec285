pub mod dashboard;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod payments;
pub mod store;
pub mod tracker;
pub mod types;

// re-export key types
pub use dashboard::{CategoryTotals, ClientTotals, DashboardSummary, PeriodWindow};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use interest::{AccrualEngine, InterestCalculation};
pub use payments::{allocate, allocate_full_settlement, PaymentAllocation};
pub use store::{LendingStore, MemoryStore};
pub use tracker::{ClientFinancialSummary, LendingTracker, Obligation};
pub use types::{Client, Loan, LoanStatus, NewPayment, Payment, Period};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
