use thiserror::Error;

use crate::accounts::AccountError;
use crate::journal::JournalError;
use crate::store::StoreError;

/// Custom error type for report generation
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Invalid report parameters: {0}")]
    InvalidData(String),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;
