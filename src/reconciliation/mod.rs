// Module declarations
pub(crate) mod reconciliation_errors;
pub(crate) mod reconciliation_model;
pub(crate) mod reconciliation_repository;
pub(crate) mod reconciliation_service;

// Re-export the public interface
pub use reconciliation_model::{BankTransaction, ReconciliationRecord, SplitAllocation};
pub use reconciliation_repository::ReconciliationRepository;
pub use reconciliation_service::ReconciliationService;

// Re-export error types for convenience
pub use reconciliation_errors::{ReconciliationError, Result};
