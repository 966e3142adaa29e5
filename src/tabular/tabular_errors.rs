use thiserror::Error;

/// Custom error type for tabular import/export
#[derive(Debug, Error)]
pub enum TabularError {
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Failed to read tabular source: {0}")]
    Source(String),
}

/// Result type for tabular operations
pub type Result<T> = std::result::Result<T, TabularError>;
