use thiserror::Error;

use crate::accounts::AccountError;
use crate::investments::InvestmentError;
use crate::journal::JournalError;
use crate::notes::NoteError;
use crate::reconciliation::ReconciliationError;
use crate::reports::ReportError;
use crate::store::StoreError;
use crate::tabular::TabularError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the bookkeeping application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Investment error: {0}")]
    Investment(#[from] InvestmentError),

    #[error("Reconciliation error: {0}")]
    Reconciliation(#[from] ReconciliationError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Tabular error: {0}")]
    Tabular(#[from] TabularError),

    #[error("Note error: {0}")]
    Note(#[from] NoteError),
}
