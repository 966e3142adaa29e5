use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::journal::JournalError;
use crate::store::StoreError;

/// Custom error type for investment subledger operations
#[derive(Debug, Error)]
pub enum InvestmentError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Investment lot not found: {0}")]
    NotFound(String),

    #[error("A lot already exists for this account and acquisition date: {0}")]
    DuplicateLot(String),

    #[error("Cannot sell {requested} shares, only {available} held")]
    OverSell {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Lot is already sold: {0}")]
    LotClosed(String),

    #[error("Invalid investment data: {0}")]
    InvalidData(String),
}

/// Result type for investment operations
pub type Result<T> = std::result::Result<T, InvestmentError>;
