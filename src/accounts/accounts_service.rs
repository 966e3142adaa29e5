use std::sync::Arc;

use log::debug;

use super::accounts_errors::{AccountError, Result};
use super::accounts_model::{Account, AccountType, AccountUpdate, NewAccount};
use super::accounts_repository::AccountRepository;
use crate::constants::{MTM_CODE_SUFFIX, MTM_NAME_SUFFIX};
use crate::journal::JournalEntry;
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Service for managing the chart of accounts
pub struct AccountService {
    store: Arc<dyn DocumentStore>,
    repository: AccountRepository,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let repository = AccountRepository::new(store.clone());
        Self { store, repository }
    }

    /// Creates a new account.
    ///
    /// Creating an Investment account also creates its paired MTM account
    /// (code + "1", name + " - MTM"). A colliding pair is skipped rather
    /// than failing the creation.
    pub fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        let code = new_account.code.trim().to_string();
        let name = new_account.name.trim().to_string();

        let mut accounts = self.repository.load()?;
        validate_unique(&accounts, &code, &name, None)?;

        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            code,
            name,
            account_type: new_account.account_type,
            description: new_account.description.trim().to_string(),
        };
        debug!("Creating account {} ({})", account.code, account.account_type);
        accounts.push(account.clone());

        if account.account_type == AccountType::Investment {
            let pair = mtm_pair_for(&account);
            if validate_unique(&accounts, &pair.code, &pair.name, None).is_ok() {
                accounts.push(pair);
            } else {
                debug!("Skipping MTM pair {}: code or name already taken", pair.code);
            }
        }

        self.repository.save(&accounts)?;
        Ok(account)
    }

    /// Updates an existing account, keeping its MTM pair in sync.
    ///
    /// The pair is created when the type becomes Investment, removed when it
    /// stops being Investment, and renamed alongside an Investment rename.
    pub fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;

        let mut accounts = self.repository.load()?;
        let index = accounts
            .iter()
            .position(|account| account.id == account_update.id)
            .ok_or_else(|| {
                AccountError::NotFound(format!(
                    "Account with id {} not found",
                    account_update.id
                ))
            })?;

        let code = account_update.code.trim().to_string();
        let name = account_update.name.trim().to_string();
        validate_unique(&accounts, &code, &name, Some(&account_update.id))?;

        let previous = accounts[index].clone();
        let updated = Account {
            id: previous.id.clone(),
            code,
            name,
            account_type: account_update.account_type,
            description: account_update.description.trim().to_string(),
        };
        accounts[index] = updated.clone();

        let was_investment = previous.account_type == AccountType::Investment;
        let is_investment = updated.account_type == AccountType::Investment;

        if was_investment || is_investment {
            let pair_code = format!("{}{}", previous.code, MTM_CODE_SUFFIX);
            let pair_index = accounts.iter().position(|account| {
                account.code.eq_ignore_ascii_case(&pair_code)
                    && account.account_type == AccountType::Mtm
            });

            match (is_investment, pair_index) {
                (true, None) => {
                    let pair = mtm_pair_for(&updated);
                    if validate_unique(&accounts, &pair.code, &pair.name, None).is_ok() {
                        accounts.push(pair);
                    }
                }
                (false, Some(pair_index)) => {
                    let pair = accounts[pair_index].clone();
                    self.ensure_unreferenced(&pair)?;
                    accounts.remove(pair_index);
                }
                (true, Some(pair_index)) => {
                    let refreshed = mtm_pair_for(&updated);
                    let pair = &mut accounts[pair_index];
                    pair.code = refreshed.code;
                    pair.name = refreshed.name;
                    pair.description = refreshed.description;
                }
                (false, None) => {}
            }
        }

        self.repository.save(&accounts)?;
        Ok(updated)
    }

    /// Deletes an account by its ID.
    ///
    /// Rejected when the account (or, for an Investment account, its MTM
    /// pair) is referenced by journal entries. Deleting an Investment
    /// account cascades to its MTM pair.
    pub fn delete_account(&self, account_id: &str) -> Result<()> {
        let mut accounts = self.repository.load()?;
        let index = accounts
            .iter()
            .position(|account| account.id == account_id)
            .ok_or_else(|| {
                AccountError::NotFound(format!("Account with id {} not found", account_id))
            })?;

        let account = accounts[index].clone();
        self.ensure_unreferenced(&account)?;

        if account.account_type == AccountType::Investment {
            let pair_code = format!("{}{}", account.code, MTM_CODE_SUFFIX);
            if let Some(pair_index) = accounts
                .iter()
                .position(|a| a.code.eq_ignore_ascii_case(&pair_code) && a.account_type == AccountType::Mtm)
            {
                let pair = accounts[pair_index].clone();
                self.ensure_unreferenced(&pair)?;
                accounts.remove(pair_index);
            }
        }

        accounts.retain(|a| a.id != account_id);
        debug!("Deleted account {}", account.code);
        self.repository.save(&accounts)?;
        Ok(())
    }

    /// Retrieves an account by its ID
    pub fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    /// Lists all accounts ordered by code
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list(None)
    }

    /// Lists accounts of one subtype, ordered by code
    pub fn list_by_type(&self, account_type: AccountType) -> Result<Vec<Account>> {
        self.repository.list(Some(account_type))
    }

    /// Creates any missing MTM pairs for existing Investment accounts and
    /// returns how many were created. Legacy documents predating automatic
    /// pairing need this backfill once on startup.
    pub fn ensure_mtm_pairs(&self) -> Result<usize> {
        let mut accounts = self.repository.load()?;
        let investments: Vec<Account> = accounts
            .iter()
            .filter(|account| account.account_type == AccountType::Investment)
            .cloned()
            .collect();

        let mut created = 0;
        for investment in investments {
            let pair = mtm_pair_for(&investment);
            let exists = accounts.iter().any(|a| {
                a.code.eq_ignore_ascii_case(&pair.code) || a.name.eq_ignore_ascii_case(&pair.name)
            });
            if !exists {
                accounts.push(pair);
                created += 1;
            }
        }

        if created > 0 {
            debug!("Backfilled {} MTM pair account(s)", created);
            self.repository.save(&accounts)?;
        }
        Ok(created)
    }

    /// Finds the well-known revenue account with the given code, creating it
    /// on first use.
    pub fn find_or_create_revenue_account(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Account> {
        let mut accounts = self.repository.load()?;
        if let Some(existing) = accounts.iter().find(|account| {
            account.account_type == AccountType::Revenue
                && account.code.eq_ignore_ascii_case(code)
        }) {
            return Ok(existing.clone());
        }

        validate_unique(&accounts, code, name, None)?;
        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.to_string(),
            name: name.to_string(),
            account_type: AccountType::Revenue,
            description: description.to_string(),
        };
        debug!("Creating well-known revenue account {}", code);
        accounts.push(account.clone());
        self.repository.save(&accounts)?;
        Ok(account)
    }

    fn ensure_unreferenced(&self, account: &Account) -> Result<()> {
        let entries: Vec<JournalEntry> = self.store.load_or_default(StoreKey::JournalEntries)?;
        let referenced = entries
            .iter()
            .flat_map(|entry| entry.line_items.iter())
            .any(|line| line.account_id == account.id);
        if referenced {
            return Err(AccountError::InUse(account.display_label()));
        }
        Ok(())
    }
}

/// Builds the paired MTM account for an Investment account.
fn mtm_pair_for(investment: &Account) -> Account {
    Account {
        id: uuid::Uuid::new_v4().to_string(),
        code: format!("{}{}", investment.code, MTM_CODE_SUFFIX),
        name: format!("{}{}", investment.name, MTM_NAME_SUFFIX),
        account_type: AccountType::Mtm,
        description: format!("MTM account for {}", investment.name),
    }
}

/// Case-insensitive code/name uniqueness check, optionally excluding one id.
fn validate_unique(
    accounts: &[Account],
    code: &str,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<()> {
    let excluded = |account: &Account| exclude_id.is_some_and(|id| account.id == id);

    if accounts
        .iter()
        .any(|a| a.code.eq_ignore_ascii_case(code) && !excluded(a))
    {
        return Err(AccountError::DuplicateCode(code.to_string()));
    }
    if accounts
        .iter()
        .any(|a| a.name.eq_ignore_ascii_case(name) && !excluded(a))
    {
        return Err(AccountError::DuplicateName(name.to_string()));
    }
    Ok(())
}
