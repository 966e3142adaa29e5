// Module declarations
pub(crate) mod json_file_store;
pub(crate) mod memory_store;
pub(crate) mod store_errors;
pub(crate) mod store_traits;

// Re-export the public interface
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use store_errors::{Result, StoreError};
pub use store_traits::{DocumentStore, DocumentStoreExt, StoreKey};
