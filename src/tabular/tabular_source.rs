use async_trait::async_trait;

use super::tabular_errors::Result;
use super::tabular_model::Table;

/// Contract for reading an uploaded tabular file.
///
/// Reading the file is the only asynchronous boundary in the system; it
/// resolves to a plain [`Table`] and everything downstream is synchronous.
#[async_trait]
pub trait TabularSource: Send + Sync {
    async fn read_table(&self) -> Result<Table>;
}
