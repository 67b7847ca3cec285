use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("unsupported amortization period: {label:?}")]
    UnsupportedPeriod {
        label: String,
    },

    #[error("payment exceeds outstanding obligation: requested {requested}, maximum {maximum}")]
    Overpayment {
        requested: Money,
        maximum: Money,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: String,
    },

    #[error("client not found: {id}")]
    ClientNotFound {
        id: String,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("loan already completed: {id}")]
    LoanAlreadyCompleted {
        id: String,
    },

    #[error("store error: {message}")]
    Store {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
