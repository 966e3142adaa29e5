use std::sync::Arc;

use super::journal_errors::{JournalError, Result};
use super::journal_model::JournalEntry;
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Repository for the journal-entries document
pub struct JournalRepository {
    store: Arc<dyn DocumentStore>,
}

impl JournalRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads all journal entries
    pub fn load(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.store.load_or_default(StoreKey::JournalEntries)?)
    }

    /// Overwrites the journal
    pub fn save(&self, entries: &[JournalEntry]) -> Result<()> {
        Ok(self.store.save(StoreKey::JournalEntries, &entries)?)
    }

    /// Retrieves an entry by its ID
    pub fn get_by_id(&self, entry_id: &str) -> Result<JournalEntry> {
        self.load()?
            .into_iter()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| {
                JournalError::NotFound(format!("Entry with id {} not found", entry_id))
            })
    }
}
