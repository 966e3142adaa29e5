use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::reconciliation_errors::{ReconciliationError, Result};
use super::reconciliation_model::{BankTransaction, ReconciliationRecord, SplitAllocation};
use super::reconciliation_repository::ReconciliationRepository;
use crate::accounts::{AccountRepository, AccountType};
use crate::constants::{balance_tolerance, AMOUNT_DECIMAL_PRECISION};
use crate::journal::{
    EntryKind, EntrySide, JournalEntry, JournalRepository, JournalService, LineItem,
    NewJournalEntry, NewLineItem,
};
use crate::store::DocumentStore;
use crate::tabular::{statement_rows, Table, TabularSource};

/// Service for importing bank statements and matching them against the books
pub struct ReconciliationService {
    accounts: AccountRepository,
    journal: JournalService,
    journal_repository: JournalRepository,
    repository: ReconciliationRepository,
}

impl ReconciliationService {
    /// Creates a new ReconciliationService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let accounts = AccountRepository::new(store.clone());
        let journal = JournalService::new(store.clone());
        let journal_repository = JournalRepository::new(store.clone());
        let repository = ReconciliationRepository::new(store);
        Self {
            accounts,
            journal,
            journal_repository,
            repository,
        }
    }

    /// Reads a statement from an uploaded tabular source and imports its rows.
    pub async fn import_from_source(
        &self,
        bank_account_id: &str,
        source: &dyn TabularSource,
    ) -> Result<Vec<BankTransaction>> {
        let table = source.read_table().await?;
        self.import_bank_transactions(bank_account_id, &table)
    }

    /// Imports statement rows as bank transactions for one bank account.
    ///
    /// Rows with an undecodable date or amount are skipped, not fatal to the
    /// batch. Returns the newly created transactions.
    pub fn import_bank_transactions(
        &self,
        bank_account_id: &str,
        table: &Table,
    ) -> Result<Vec<BankTransaction>> {
        let account = self.accounts.get_by_id(bank_account_id)?;
        if account.account_type != AccountType::BankAccount {
            return Err(ReconciliationError::InvalidData(format!(
                "Account {} is not a bank account",
                account.display_label()
            )));
        }

        let rows = statement_rows(table)?;
        let mut transactions = self.repository.load_transactions()?;
        let mut imported = Vec::with_capacity(rows.len());
        for row in rows {
            let transaction = BankTransaction {
                id: uuid::Uuid::new_v4().to_string(),
                date: row.date,
                amount: row.amount,
                description: row.description,
                bank_account_id: bank_account_id.to_string(),
                imported: true,
                journal_entry_id: None,
            };
            transactions.push(transaction.clone());
            imported.push(transaction);
        }
        self.repository.save_transactions(&transactions)?;
        debug!(
            "Imported {} bank transactions into account {}",
            imported.len(),
            account.display_label()
        );
        Ok(imported)
    }

    /// Matches a bank transaction by posting a fresh two-line entry against
    /// `counter_account_id`, then marks both sides reconciled.
    pub fn match_new(
        &self,
        bank_transaction_id: &str,
        counter_account_id: &str,
    ) -> Result<JournalEntry> {
        let transaction = self.repository.get_transaction(bank_transaction_id)?;
        self.ensure_unreconciled(&transaction.id)?;
        self.accounts.get_by_id(counter_account_id)?;

        let amount = transaction.amount.abs();
        let bank_side = bank_side_of(&transaction);
        let entry = self.journal.post_generated(NewJournalEntry {
            date: transaction.date,
            description: transaction.description.clone(),
            kind: EntryKind::Standard,
            line_items: vec![
                NewLineItem {
                    account_id: transaction.bank_account_id.clone(),
                    description: transaction.description.clone(),
                    side: bank_side,
                    amount,
                },
                NewLineItem {
                    account_id: counter_account_id.to_string(),
                    description: transaction.description.clone(),
                    side: bank_side.opposite(),
                    amount,
                },
            ],
        })?;
        self.finish_match(&transaction, &entry.id)
    }

    /// Matches a bank transaction against an already-posted, unreconciled
    /// entry of the same date by appending the bank leg to it.
    ///
    /// This is how a pending single-sided investment purchase receives its
    /// offsetting cash line.
    pub fn match_existing(
        &self,
        bank_transaction_id: &str,
        journal_entry_id: &str,
    ) -> Result<JournalEntry> {
        let transaction = self.repository.get_transaction(bank_transaction_id)?;
        self.ensure_unreconciled(&transaction.id)?;

        let mut entries = self.journal_repository.load()?;
        let index = entries
            .iter()
            .position(|entry| entry.id == journal_entry_id)
            .ok_or_else(|| {
                ReconciliationError::NotFound(format!(
                    "Entry with id {} not found",
                    journal_entry_id
                ))
            })?;
        if entries[index].reconciled {
            return Err(ReconciliationError::AlreadyReconciled(
                journal_entry_id.to_string(),
            ));
        }
        if entries[index].date != transaction.date {
            return Err(ReconciliationError::DateMismatch {
                entry_date: entries[index].date,
                bank_date: transaction.date,
            });
        }

        let bank_account = self.accounts.get_by_id(&transaction.bank_account_id)?;
        entries[index].line_items.push(LineItem {
            account_id: bank_account.id.clone(),
            account_name: bank_account.display_label(),
            account_type: bank_account.account_type,
            description: transaction.description.clone(),
            side: bank_side_of(&transaction),
            amount: transaction.amount.abs().round_dp(AMOUNT_DECIMAL_PRECISION),
        });
        let entry_id = entries[index].id.clone();
        self.journal_repository.save(&entries)?;

        self.finish_match(&transaction, &entry_id)
    }

    /// Splits one bank transaction across several counter accounts.
    ///
    /// The allocations must cover the bank amount within the reporting
    /// tolerance of 0.01.
    pub fn match_split(
        &self,
        bank_transaction_id: &str,
        allocations: &[SplitAllocation],
    ) -> Result<JournalEntry> {
        let transaction = self.repository.get_transaction(bank_transaction_id)?;
        self.ensure_unreconciled(&transaction.id)?;

        if allocations.is_empty() {
            return Err(ReconciliationError::InvalidData(
                "A split needs at least one allocation".to_string(),
            ));
        }
        for allocation in allocations {
            allocation.validate()?;
        }
        let allocated: Decimal = allocations.iter().map(|a| a.amount.abs()).sum();
        let bank_amount = transaction.amount.abs();
        if (allocated - bank_amount).abs() > balance_tolerance() {
            return Err(ReconciliationError::SplitMismatch {
                bank_amount,
                allocated,
            });
        }

        let bank_side = bank_side_of(&transaction);
        let mut line_items = vec![NewLineItem {
            account_id: transaction.bank_account_id.clone(),
            description: transaction.description.clone(),
            side: bank_side,
            amount: bank_amount,
        }];
        for allocation in allocations {
            line_items.push(NewLineItem {
                account_id: allocation.counter_account_id.clone(),
                description: allocation.description.clone(),
                side: bank_side.opposite(),
                amount: allocation.amount.abs(),
            });
        }
        let entry = self.journal.post_reconciliation(NewJournalEntry {
            date: transaction.date,
            description: transaction.description.clone(),
            kind: EntryKind::Standard,
            line_items,
        })?;
        self.finish_match(&transaction, &entry.id)
    }

    /// Bank transactions of one account not yet reconciled, optionally
    /// limited to a date range, in chronological order.
    pub fn unmatched_for(
        &self,
        bank_account_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<BankTransaction>> {
        let records = self.repository.load_records()?;
        let mut transactions = self.repository.load_transactions()?;
        transactions.retain(|transaction| {
            transaction.bank_account_id == bank_account_id
                && !records.contains_key(&transaction.id)
                && start.map_or(true, |s| transaction.date >= s)
                && end.map_or(true, |e| transaction.date <= e)
        });
        transactions.sort_by_key(|transaction| transaction.date);
        Ok(transactions)
    }

    fn ensure_unreconciled(&self, transaction_id: &str) -> Result<()> {
        let records = self.repository.load_records()?;
        if records.contains_key(transaction_id) {
            return Err(ReconciliationError::AlreadyReconciled(
                transaction_id.to_string(),
            ));
        }
        Ok(())
    }

    /// Links the bank transaction to its entry, flags the entry reconciled
    /// and records both ids as reconciled.
    fn finish_match(
        &self,
        transaction: &BankTransaction,
        entry_id: &str,
    ) -> Result<JournalEntry> {
        let mut entries = self.journal_repository.load()?;
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| {
                ReconciliationError::NotFound(format!("Entry with id {} not found", entry_id))
            })?;
        entry.reconciled = true;
        let reconciled_entry = entry.clone();
        self.journal_repository.save(&entries)?;

        let mut transactions = self.repository.load_transactions()?;
        if let Some(stored) = transactions
            .iter_mut()
            .find(|stored| stored.id == transaction.id)
        {
            stored.journal_entry_id = Some(entry_id.to_string());
        }
        self.repository.save_transactions(&transactions)?;

        let mut records = self.repository.load_records()?;
        let record = ReconciliationRecord {
            reconciled_at: Utc::now(),
            bank_account_id: transaction.bank_account_id.clone(),
        };
        records.insert(transaction.id.clone(), record.clone());
        records.insert(entry_id.to_string(), record);
        self.repository.save_records(&records)?;

        debug!(
            "Reconciled bank transaction {} against entry {}",
            transaction.id, entry_id
        );
        Ok(reconciled_entry)
    }
}

fn bank_side_of(transaction: &BankTransaction) -> EntrySide {
    if transaction.amount >= Decimal::ZERO {
        EntrySide::Debit
    } else {
        EntrySide::Credit
    }
}
