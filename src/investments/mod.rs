// Module declarations
pub(crate) mod investments_errors;
pub(crate) mod investments_model;
pub(crate) mod investments_repository;
pub(crate) mod investments_service;

// Re-export the public interface
pub use investments_model::{
    AccountPositions, InvestmentLot, InvestmentPosition, InvestmentRound, LotDisposal,
    LotSelection, LotStatus, NewPurchase, Revaluation, SaleRequest,
};
pub use investments_repository::InvestmentRepository;
pub use investments_service::InvestmentService;

// Re-export error types for convenience
pub use investments_errors::{InvestmentError, Result};
