use thiserror::Error;

use crate::store::StoreError;

/// Custom error type for account-related operations
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("An account with code '{0}' already exists")]
    DuplicateCode(String),

    #[error("An account with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid account data: {0}")]
    InvalidData(String),

    #[error("Account '{0}' is referenced by journal entries")]
    InUse(String),
}

/// Result type for account operations
pub type Result<T> = std::result::Result<T, AccountError>;
