use std::sync::Arc;

use super::accounts_errors::{AccountError, Result};
use super::accounts_model::{Account, AccountType};
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Repository for the chart-of-accounts document
pub struct AccountRepository {
    store: Arc<dyn DocumentStore>,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads the full chart of accounts
    pub fn load(&self) -> Result<Vec<Account>> {
        Ok(self.store.load_or_default(StoreKey::ChartOfAccounts)?)
    }

    /// Overwrites the full chart of accounts
    pub fn save(&self, accounts: &[Account]) -> Result<()> {
        Ok(self.store.save(StoreKey::ChartOfAccounts, &accounts)?)
    }

    /// Retrieves an account by its ID
    pub fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.load()?
            .into_iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| {
                AccountError::NotFound(format!("Account with id {} not found", account_id))
            })
    }

    /// Finds an account by its code, matched case-insensitively
    pub fn find_by_code(&self, code: &str) -> Result<Option<Account>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|account| account.code.eq_ignore_ascii_case(code)))
    }

    /// Lists accounts ordered by code
    pub fn list(&self, type_filter: Option<AccountType>) -> Result<Vec<Account>> {
        let mut accounts = self.load()?;
        if let Some(account_type) = type_filter {
            accounts.retain(|account| account.account_type == account_type);
        }
        accounts.sort_by(|a, b| a.code.to_lowercase().cmp(&b.code.to_lowercase()));
        Ok(accounts)
    }
}
