use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::journal_errors::{JournalError, Result};
use crate::accounts::AccountType;

/// Side of a double-entry line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Debit,
    Credit,
}

impl EntrySide {
    pub fn opposite(&self) -> EntrySide {
        match self {
            EntrySide::Debit => EntrySide::Credit,
            EntrySide::Credit => EntrySide::Debit,
        }
    }
}

impl std::fmt::Display for EntrySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySide::Debit => f.write_str("debit"),
            EntrySide::Credit => f.write_str("credit"),
        }
    }
}

/// Kind of journal entry.
///
/// `InvestmentPurchase` entries are the documented single-sided special
/// case: they may post with only the investment leg, the offsetting cash leg
/// arriving later through reconciliation. Every other kind must balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    #[default]
    Standard,
    InvestmentPurchase,
    InvestmentSale,
}

/// One line of a journal entry.
///
/// `account_name` and `account_type` are snapshots taken at posting time;
/// renaming an account later does not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub account_id: String,
    pub account_name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub side: EntrySide,
    pub amount: Decimal,
}

/// A posted journal entry (transaction).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: EntryKind,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub reconciled: bool,
}

impl JournalEntry {
    pub fn total_debits(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|line| line.side == EntrySide::Debit)
            .map(|line| line.amount)
            .sum()
    }

    pub fn total_credits(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|line| line.side == EntrySide::Credit)
            .map(|line| line.amount)
            .sum()
    }

    /// Whether debits equal credits exactly. False for investment purchases
    /// still awaiting their offsetting leg.
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }
}

/// Input model for one line of a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub account_id: String,
    #[serde(default)]
    pub description: String,
    pub side: EntrySide,
    pub amount: Decimal,
}

/// Input model for posting a new journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: EntryKind,
    pub line_items: Vec<NewLineItem>,
}

impl NewJournalEntry {
    /// Validates the new entry data
    pub fn validate(&self) -> Result<()> {
        validate_lines(&self.line_items)
    }
}

/// Input model for replacing an existing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub line_items: Vec<NewLineItem>,
}

impl EntryUpdate {
    /// Validates the entry update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(JournalError::InvalidData(
                "Entry ID is required for updates".to_string(),
            ));
        }
        validate_lines(&self.line_items)
    }
}

fn validate_lines(line_items: &[NewLineItem]) -> Result<()> {
    if line_items.iter().any(|line| line.amount < Decimal::ZERO) {
        return Err(JournalError::InvalidData(
            "Line item amounts cannot be negative".to_string(),
        ));
    }
    if !line_items.iter().any(|line| line.amount > Decimal::ZERO) {
        return Err(JournalError::InvalidData(
            "An entry needs at least one line item with a nonzero amount".to_string(),
        ));
    }
    Ok(())
}
