use std::collections::HashMap;
use std::sync::Arc;

use super::reconciliation_errors::{ReconciliationError, Result};
use super::reconciliation_model::{BankTransaction, ReconciliationRecord};
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Repository for the bank-transaction and reconciliation-record documents
pub struct ReconciliationRepository {
    store: Arc<dyn DocumentStore>,
}

impl ReconciliationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads all bank transactions
    pub fn load_transactions(&self) -> Result<Vec<BankTransaction>> {
        Ok(self.store.load_or_default(StoreKey::BankTransactions)?)
    }

    /// Overwrites the bank-transaction collection
    pub fn save_transactions(&self, transactions: &[BankTransaction]) -> Result<()> {
        Ok(self.store.save(StoreKey::BankTransactions, &transactions)?)
    }

    /// Retrieves a bank transaction by its ID
    pub fn get_transaction(&self, transaction_id: &str) -> Result<BankTransaction> {
        self.load_transactions()?
            .into_iter()
            .find(|transaction| transaction.id == transaction_id)
            .ok_or_else(|| {
                ReconciliationError::NotFound(format!(
                    "Bank transaction with id {} not found",
                    transaction_id
                ))
            })
    }

    /// Loads the reconciliation records, keyed by transaction id
    /// (bank-side or book-side).
    pub fn load_records(&self) -> Result<HashMap<String, ReconciliationRecord>> {
        Ok(self.store.load_or_default(StoreKey::ReconciledEntries)?)
    }

    /// Overwrites the reconciliation records
    pub fn save_records(&self, records: &HashMap<String, ReconciliationRecord>) -> Result<()> {
        Ok(self.store.save(StoreKey::ReconciledEntries, records)?)
    }
}
