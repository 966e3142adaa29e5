use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::store::StoreError;

/// Custom error type for journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Journal entry not found: {0}")]
    NotFound(String),

    #[error("Entry is not balanced: debits {debits} != credits {credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },

    #[error("Invalid entry data: {0}")]
    InvalidData(String),
}

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, JournalError>;
