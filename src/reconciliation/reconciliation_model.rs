use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::reconciliation_errors::{ReconciliationError, Result};

/// One bank-side transaction awaiting (or linked by) reconciliation.
///
/// `amount` is signed from the bank account's perspective: positive for an
/// inflow (book debit), negative for an outflow (book credit). Rows either
/// arrive through statement import (`imported: true`) or are mirrored from
/// posted journal entries touching a bank account. `journal_entry_id` links
/// a transaction to its book-side entry once one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub bank_account_id: String,
    #[serde(default)]
    pub imported: bool,
    #[serde(default)]
    pub journal_entry_id: Option<String>,
}

/// Marks one transaction id (bank-side or book-side) as reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRecord {
    pub reconciled_at: DateTime<Utc>,
    pub bank_account_id: String,
}

/// One book-side allocation when splitting a bank transaction across
/// multiple counter accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAllocation {
    pub counter_account_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

impl SplitAllocation {
    /// Validates the allocation data
    pub fn validate(&self) -> Result<()> {
        if self.counter_account_id.trim().is_empty() {
            return Err(ReconciliationError::InvalidData(
                "Allocation needs a counter account".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ReconciliationError::InvalidData(
                "Allocation amounts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
