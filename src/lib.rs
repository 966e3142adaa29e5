pub mod store;

pub mod accounts;
pub mod balances;
pub mod investments;
pub mod journal;
pub mod notes;
pub mod reconciliation;
pub mod reports;
pub mod tabular;

pub mod constants;
pub mod errors;

pub use errors::{Error, Result};
