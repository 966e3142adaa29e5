use thiserror::Error;

use crate::store::StoreError;

/// Custom error type for note operations
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Invalid note data: {0}")]
    InvalidData(String),
}

/// Result type for note operations
pub type Result<T> = std::result::Result<T, NoteError>;
