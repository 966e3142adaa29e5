use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::store_errors::Result;

/// Keys of the persisted document collections.
///
/// String forms match the legacy browser-storage key names so existing
/// exported documents load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ChartOfAccounts,
    JournalEntries,
    InvestmentDetails,
    BankTransactions,
    ReconciledEntries,
    Notes,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::ChartOfAccounts => "chartOfAccounts",
            StoreKey::JournalEntries => "journalEntries",
            StoreKey::InvestmentDetails => "investmentDetails",
            StoreKey::BankTransactions => "bankTransactions",
            StoreKey::ReconciledEntries => "reconciledEntries",
            StoreKey::Notes => "notes",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract for whole-document key-value persistence.
///
/// Each key holds one JSON document; saves overwrite the whole document and
/// there is no atomicity across keys. A logical operation that touches two
/// collections performs two independent saves.
pub trait DocumentStore: Send + Sync {
    /// Loads the raw document stored under `key`, or `None` when absent.
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>>;

    /// Overwrites the document stored under `key`.
    fn save_raw(&self, key: StoreKey, document: Value) -> Result<()>;
}

/// Typed load/save helpers over any [`DocumentStore`].
pub trait DocumentStoreExt {
    /// Loads and deserializes the document under `key`, falling back to the
    /// collection's default when the key is absent.
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: StoreKey) -> Result<T>;

    /// Serializes and saves `document` under `key`.
    fn save<T: Serialize>(&self, key: StoreKey, document: &T) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: StoreKey) -> Result<T> {
        match self.load_raw(key)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize>(&self, key: StoreKey, document: &T) -> Result<()> {
        self.save_raw(key, serde_json::to_value(document)?)
    }
}
