// Module declarations
pub(crate) mod tabular_errors;
pub(crate) mod tabular_model;
pub(crate) mod tabular_source;

// Re-export the public interface
pub use tabular_model::{
    bank_import_template, decode_amount, decode_external_date, statement_rows, Cell,
    StatementRow, Table,
};
pub use tabular_source::TabularSource;

// Re-export error types for convenience
pub use tabular_errors::{Result, TabularError};
