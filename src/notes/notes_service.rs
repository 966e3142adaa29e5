use std::sync::Arc;

use chrono::Utc;
use log::debug;

use super::notes_errors::{NoteError, Result};
use super::notes_model::Note;
use super::notes_repository::NoteRepository;
use crate::store::DocumentStore;

/// Service for free-text notes
pub struct NoteService {
    repository: NoteRepository,
}

impl NoteService {
    /// Creates a new NoteService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: NoteRepository::new(store),
        }
    }

    /// Adds a note. Blank text is rejected.
    pub fn add_note(&self, text: &str) -> Result<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::InvalidData(
                "Note text cannot be empty".to_string(),
            ));
        }
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            text: text.to_string(),
        };
        let mut notes = self.repository.load()?;
        notes.push(note.clone());
        self.repository.save(&notes)?;
        debug!("Added note {}", note.id);
        Ok(note)
    }

    /// All notes, newest first
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let mut notes = self.repository.load()?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    /// Deletes a note by its ID
    pub fn delete_note(&self, note_id: &str) -> Result<()> {
        let mut notes = self.repository.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != note_id);
        if notes.len() == before {
            return Err(NoteError::NotFound(note_id.to_string()));
        }
        self.repository.save(&notes)
    }
}
