use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::journal_errors::{JournalError, Result};
use super::journal_model::{
    EntryKind, EntrySide, EntryUpdate, JournalEntry, LineItem, NewJournalEntry, NewLineItem,
};
use super::journal_repository::JournalRepository;
use crate::accounts::{AccountRepository, AccountType};
use crate::constants::{balance_tolerance, AMOUNT_DECIMAL_PRECISION};
use crate::reconciliation::BankTransaction;
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// How strictly an entry's debit/credit totals are validated at posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BalanceCheck {
    /// Exact Decimal equality (manual postings).
    Exact,
    /// Within the report tolerance (generated entries whose sub-0.01
    /// gain/loss line is deliberately dropped).
    Tolerant,
    /// No check (single-sided investment purchases).
    Skip,
}

impl BalanceCheck {
    fn for_kind(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Standard => BalanceCheck::Exact,
            EntryKind::InvestmentPurchase => BalanceCheck::Skip,
            EntryKind::InvestmentSale => BalanceCheck::Tolerant,
        }
    }
}

/// Service for posting and querying journal entries
pub struct JournalService {
    store: Arc<dyn DocumentStore>,
    repository: JournalRepository,
    accounts: AccountRepository,
}

impl JournalService {
    /// Creates a new JournalService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let repository = JournalRepository::new(store.clone());
        let accounts = AccountRepository::new(store.clone());
        Self {
            store,
            repository,
            accounts,
        }
    }

    /// Posts a new journal entry.
    ///
    /// Zero-amount lines are dropped; debits must equal credits exactly
    /// unless the entry kind documents otherwise. Lines touching a
    /// Bank Account auto-mirror a bank transaction for reconciliation.
    pub fn post_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        let check = BalanceCheck::for_kind(new_entry.kind);
        self.post(new_entry, true, check)
    }

    /// Posts an entry generated by another subsystem (investments,
    /// reconciliation) without mirroring bank lines back into the
    /// bank-transaction collection.
    pub(crate) fn post_generated(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        let check = BalanceCheck::for_kind(new_entry.kind);
        self.post(new_entry, false, check)
    }

    /// Posts a reconciliation entry. Split allocations are accepted within
    /// the reporting tolerance rather than to the cent.
    pub(crate) fn post_reconciliation(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        self.post(new_entry, false, BalanceCheck::Tolerant)
    }

    fn post(
        &self,
        new_entry: NewJournalEntry,
        mirror_bank_lines: bool,
        check: BalanceCheck,
    ) -> Result<JournalEntry> {
        new_entry.validate()?;

        let line_items = self.resolve_lines(&new_entry.line_items)?;
        validate_balance(&line_items, check)?;

        let entry = JournalEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: new_entry.date,
            description: new_entry.description.trim().to_string(),
            kind: new_entry.kind,
            line_items,
            reconciled: false,
        };
        debug!(
            "Posting entry {} ({} line items) dated {}",
            entry.id,
            entry.line_items.len(),
            entry.date
        );

        let mut entries = self.repository.load()?;
        entries.push(entry.clone());
        self.repository.save(&entries)?;

        if mirror_bank_lines {
            self.mirror_bank_lines(&entry)?;
        }
        Ok(entry)
    }

    /// Replaces an entry's date, description and line items, re-validating
    /// the balance under the entry's original kind. Mirrored bank rows are
    /// rebuilt from the new lines.
    pub fn edit_entry(&self, update: EntryUpdate) -> Result<JournalEntry> {
        update.validate()?;

        let mut entries = self.repository.load()?;
        let index = entries
            .iter()
            .position(|entry| entry.id == update.id)
            .ok_or_else(|| {
                JournalError::NotFound(format!("Entry with id {} not found", update.id))
            })?;

        let line_items = self.resolve_lines(&update.line_items)?;
        validate_balance(&line_items, BalanceCheck::for_kind(entries[index].kind))?;

        entries[index].date = update.date;
        entries[index].description = update.description.trim().to_string();
        entries[index].line_items = line_items;

        let updated = entries[index].clone();
        self.repository.save(&entries)?;

        self.remove_mirrored_rows(&updated.id)?;
        self.mirror_bank_lines(&updated)?;
        Ok(updated)
    }

    /// Deletes an entry by its ID, dropping its mirrored bank rows and
    /// clearing the entry link on any imported bank transaction.
    pub fn delete_entry(&self, entry_id: &str) -> Result<()> {
        let mut entries = self.repository.load()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        if entries.len() == before {
            return Err(JournalError::NotFound(format!(
                "Entry with id {} not found",
                entry_id
            )));
        }
        self.repository.save(&entries)?;

        self.remove_mirrored_rows(entry_id)?;
        self.unlink_imported_transactions(entry_id)
    }

    /// Retrieves an entry by its ID
    pub fn get_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        self.repository.get_by_id(entry_id)
    }

    /// All entries in chronological order; same-date entries keep the order
    /// they were posted in.
    pub fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = self.repository.load()?;
        sort_chronologically(&mut entries);
        Ok(entries)
    }

    /// Entries dated within `[start, end]`, in chronological order
    pub fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<JournalEntry>> {
        let mut entries = self.repository.load()?;
        entries.retain(|entry| entry.date >= start && entry.date <= end);
        sort_chronologically(&mut entries);
        Ok(entries)
    }

    /// Entries dated on or before `as_of`, in chronological order
    pub fn entries_as_of(&self, as_of: NaiveDate) -> Result<Vec<JournalEntry>> {
        let mut entries = self.repository.load()?;
        entries.retain(|entry| entry.date <= as_of);
        sort_chronologically(&mut entries);
        Ok(entries)
    }

    /// Resolves input lines against the chart of accounts, snapshotting the
    /// account label and type. Zero-amount lines are dropped.
    fn resolve_lines(&self, line_items: &[NewLineItem]) -> Result<Vec<LineItem>> {
        let mut resolved = Vec::with_capacity(line_items.len());
        for line in line_items {
            if line.amount == Decimal::ZERO {
                continue;
            }
            let account = self.accounts.get_by_id(&line.account_id)?;
            resolved.push(LineItem {
                account_id: account.id.clone(),
                account_name: account.display_label(),
                account_type: account.account_type,
                description: line.description.trim().to_string(),
                side: line.side,
                amount: line.amount.round_dp(AMOUNT_DECIMAL_PRECISION),
            });
        }
        Ok(resolved)
    }

    /// Mirrors each bank-account line into the bank-transaction collection,
    /// signed so that a debit is an inflow, linked by `journal_entry_id`.
    fn mirror_bank_lines(&self, entry: &JournalEntry) -> Result<()> {
        let bank_lines: Vec<&LineItem> = entry
            .line_items
            .iter()
            .filter(|line| line.account_type == AccountType::BankAccount)
            .collect();
        if bank_lines.is_empty() {
            return Ok(());
        }

        let mut transactions: Vec<BankTransaction> =
            self.store.load_or_default(StoreKey::BankTransactions)?;
        for line in bank_lines {
            let amount = match line.side {
                EntrySide::Debit => line.amount,
                EntrySide::Credit => -line.amount,
            };
            let description = if line.description.is_empty() {
                entry.description.clone()
            } else {
                line.description.clone()
            };
            transactions.push(BankTransaction {
                id: uuid::Uuid::new_v4().to_string(),
                date: entry.date,
                amount,
                description,
                bank_account_id: line.account_id.clone(),
                imported: false,
                journal_entry_id: Some(entry.id.clone()),
            });
        }
        self.store.save(StoreKey::BankTransactions, &transactions)?;
        Ok(())
    }

    /// Drops the bank rows previously mirrored from this entry.
    fn remove_mirrored_rows(&self, entry_id: &str) -> Result<()> {
        let mut transactions: Vec<BankTransaction> =
            self.store.load_or_default(StoreKey::BankTransactions)?;
        let before = transactions.len();
        transactions.retain(|transaction| {
            transaction.imported || transaction.journal_entry_id.as_deref() != Some(entry_id)
        });
        if transactions.len() != before {
            self.store.save(StoreKey::BankTransactions, &transactions)?;
        }
        Ok(())
    }

    /// Clears the dangling entry link on imported bank transactions.
    fn unlink_imported_transactions(&self, entry_id: &str) -> Result<()> {
        let mut transactions: Vec<BankTransaction> =
            self.store.load_or_default(StoreKey::BankTransactions)?;
        let mut changed = false;
        for transaction in transactions.iter_mut() {
            if transaction.journal_entry_id.as_deref() == Some(entry_id) {
                transaction.journal_entry_id = None;
                changed = true;
            }
        }
        if changed {
            self.store.save(StoreKey::BankTransactions, &transactions)?;
        }
        Ok(())
    }
}

fn sort_chronologically(entries: &mut [JournalEntry]) {
    // Stable sort: same-date entries keep the order they were posted in.
    entries.sort_by_key(|entry| entry.date);
}

fn validate_balance(line_items: &[LineItem], check: BalanceCheck) -> Result<()> {
    if check == BalanceCheck::Skip {
        return Ok(());
    }
    let debits: Decimal = line_items
        .iter()
        .filter(|line| line.side == EntrySide::Debit)
        .map(|line| line.amount)
        .sum();
    let credits: Decimal = line_items
        .iter()
        .filter(|line| line.side == EntrySide::Credit)
        .map(|line| line.amount)
        .sum();

    let balanced = match check {
        BalanceCheck::Exact => debits == credits,
        BalanceCheck::Tolerant => (debits - credits).abs() <= balance_tolerance(),
        BalanceCheck::Skip => true,
    };
    if !balanced {
        return Err(JournalError::Unbalanced { debits, credits });
    }
    Ok(())
}
