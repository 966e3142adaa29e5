use serde::{Deserialize, Serialize};

use super::accounts_errors::{AccountError, Result};
use crate::journal::EntrySide;

/// Closed set of account subtypes.
///
/// Serialized forms match the legacy chart-of-accounts documents. The
/// report-grouping category and the normal-balance side are carried here as
/// data rather than re-derived from string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "Current Asset")]
    CurrentAsset,
    #[serde(rename = "Non-current Asset")]
    NonCurrentAsset,
    #[serde(rename = "Prepayment")]
    Prepayment,
    #[serde(rename = "Bank Account")]
    BankAccount,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "MTM")]
    Mtm,
    #[serde(rename = "Current Liability")]
    CurrentLiability,
    #[serde(rename = "Non-current Liability")]
    NonCurrentLiability,
    #[serde(rename = "Equity")]
    Equity,
    #[serde(rename = "Other Income")]
    OtherIncome,
    #[serde(rename = "Revenue")]
    Revenue,
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Depreciation")]
    Depreciation,
    #[serde(rename = "Expense")]
    Expense,
}

/// Top-level report grouping for an account subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    /// Balance-sheet / P&L grouping for this subtype.
    pub fn category(&self) -> AccountCategory {
        match self {
            AccountType::CurrentAsset
            | AccountType::NonCurrentAsset
            | AccountType::Prepayment
            | AccountType::BankAccount
            | AccountType::Investment
            | AccountType::Mtm => AccountCategory::Asset,
            AccountType::CurrentLiability | AccountType::NonCurrentLiability => {
                AccountCategory::Liability
            }
            AccountType::Equity => AccountCategory::Equity,
            AccountType::OtherIncome | AccountType::Revenue | AccountType::Sales => {
                AccountCategory::Revenue
            }
            AccountType::Depreciation | AccountType::Expense => AccountCategory::Expense,
        }
    }

    /// Side on which this account's balance conventionally increases.
    pub fn normal_side(&self) -> EntrySide {
        match self.category() {
            AccountCategory::Asset | AccountCategory::Expense => EntrySide::Debit,
            AccountCategory::Liability | AccountCategory::Equity | AccountCategory::Revenue => {
                EntrySide::Credit
            }
        }
    }

    pub fn is_debit_normal(&self) -> bool {
        self.normal_side() == EntrySide::Debit
    }

    /// Asset subtypes in the order the balance sheet lists them.
    pub const ASSET_TYPES: [AccountType; 6] = [
        AccountType::CurrentAsset,
        AccountType::NonCurrentAsset,
        AccountType::Prepayment,
        AccountType::BankAccount,
        AccountType::Investment,
        AccountType::Mtm,
    ];

    /// Liability subtypes in balance-sheet order.
    pub const LIABILITY_TYPES: [AccountType; 2] = [
        AccountType::CurrentLiability,
        AccountType::NonCurrentLiability,
    ];
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AccountType::CurrentAsset => "Current Asset",
            AccountType::NonCurrentAsset => "Non-current Asset",
            AccountType::Prepayment => "Prepayment",
            AccountType::BankAccount => "Bank Account",
            AccountType::Investment => "Investment",
            AccountType::Mtm => "MTM",
            AccountType::CurrentLiability => "Current Liability",
            AccountType::NonCurrentLiability => "Non-current Liability",
            AccountType::Equity => "Equity",
            AccountType::OtherIncome => "Other Income",
            AccountType::Revenue => "Revenue",
            AccountType::Sales => "Sales",
            AccountType::Depreciation => "Depreciation",
            AccountType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Domain model representing an account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub description: String,
}

impl Account {
    /// Denormalized "CODE - Name" label used on line items and reports.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub description: String,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account code cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: String,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub description: String,
}

impl AccountUpdate {
    /// Validates the account update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account ID is required for updates".to_string(),
            ));
        }
        if self.code.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account code cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
