use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::error;
use serde_json::{Map, Value};

use super::store_errors::{Result, StoreError};
use super::store_traits::{DocumentStore, StoreKey};

/// Document store backed by a single JSON object file.
///
/// The file holds one top-level object keyed by the collection names, the
/// same layout as a dumped browser-storage export. Every save rewrites the
/// whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the backing file.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            _ => {
                error!("Store file {} is not a JSON object", self.path.display());
                Err(StoreError::Corrupt(self.path.display().to_string()))
            }
        }
    }

    fn write_all(&self, documents: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&Value::Object(documents.clone()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key.as_str()))
    }

    fn save_raw(&self, key: StoreKey, document: Value) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut documents = self.read_all()?;
        documents.insert(key.as_str().to_string(), document);
        self.write_all(&documents)
    }
}
