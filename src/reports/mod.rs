// Module declarations
pub(crate) mod reports_errors;
pub(crate) mod reports_model;
pub(crate) mod reports_service;

// Re-export the public interface
pub use reports_model::{
    BalanceSheetReport, GeneralLedgerReport, LedgerSection, ProfitLossReport, ReportRow,
    ReportSection, TrialBalanceReport, TrialBalanceRow,
};
pub use reports_service::ReportService;

// Re-export error types for convenience
pub use reports_errors::{ReportError, Result};
