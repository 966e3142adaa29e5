use thiserror::Error;

/// Custom error type for document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store document for '{0}' is not of the expected shape")]
    Corrupt(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
