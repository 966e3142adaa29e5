use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::journal::JournalError;
use crate::store::StoreError;
use crate::tabular::TabularError;

/// Custom error type for reconciliation operations
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Import error: {0}")]
    Import(#[from] TabularError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transaction {0} is already reconciled")]
    AlreadyReconciled(String),

    #[error("Entry date {entry_date} does not match bank transaction date {bank_date}")]
    DateMismatch {
        entry_date: NaiveDate,
        bank_date: NaiveDate,
    },

    #[error("Split allocations total {allocated} does not cover bank amount {bank_amount}")]
    SplitMismatch {
        bank_amount: Decimal,
        allocated: Decimal,
    },

    #[error("Invalid reconciliation data: {0}")]
    InvalidData(String),
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, ReconciliationError>;
