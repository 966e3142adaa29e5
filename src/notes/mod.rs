// Module declarations
pub(crate) mod notes_errors;
pub(crate) mod notes_model;
pub(crate) mod notes_repository;
pub(crate) mod notes_service;

// Re-export the public interface
pub use notes_model::Note;
pub use notes_repository::NoteRepository;
pub use notes_service::NoteService;

// Re-export error types for convenience
pub use notes_errors::{NoteError, Result};
