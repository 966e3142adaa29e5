use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::store_errors::{Result, StoreError};
use super::store_traits::{DocumentStore, StoreKey};

/// In-memory document store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<StoreKey, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>> {
        let documents = self.documents.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(documents.get(&key).cloned())
    }

    fn save_raw(&self, key: StoreKey, document: Value) -> Result<()> {
        let mut documents = self.documents.lock().map_err(|_| StoreError::Poisoned)?;
        documents.insert(key, document);
        Ok(())
    }
}
