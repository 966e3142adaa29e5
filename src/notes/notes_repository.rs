use std::sync::Arc;

use super::notes_errors::Result;
use super::notes_model::Note;
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Repository for the notes document
pub struct NoteRepository {
    store: Arc<dyn DocumentStore>,
}

impl NoteRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads all notes
    pub fn load(&self) -> Result<Vec<Note>> {
        Ok(self.store.load_or_default(StoreKey::Notes)?)
    }

    /// Overwrites the notes collection
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        Ok(self.store.save(StoreKey::Notes, &notes)?)
    }
}
