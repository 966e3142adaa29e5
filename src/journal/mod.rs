// Module declarations
pub(crate) mod journal_errors;
pub(crate) mod journal_model;
pub(crate) mod journal_repository;
pub(crate) mod journal_service;

// Re-export the public interface
pub use journal_model::{
    EntryKind, EntrySide, EntryUpdate, JournalEntry, LineItem, NewJournalEntry, NewLineItem,
};
pub use journal_repository::JournalRepository;
pub use journal_service::JournalService;

// Re-export error types for convenience
pub use journal_errors::{JournalError, Result};
