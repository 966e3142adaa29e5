use std::sync::Arc;

use chrono::NaiveDate;

use super::investments_errors::Result;
use super::investments_model::InvestmentLot;
use crate::store::{DocumentStore, DocumentStoreExt, StoreKey};

/// Repository for the investment-lot document
pub struct InvestmentRepository {
    store: Arc<dyn DocumentStore>,
}

impl InvestmentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Loads all investment lots
    pub fn load(&self) -> Result<Vec<InvestmentLot>> {
        Ok(self.store.load_or_default(StoreKey::InvestmentDetails)?)
    }

    /// Overwrites the investment-lot collection
    pub fn save(&self, lots: &[InvestmentLot]) -> Result<()> {
        Ok(self.store.save(StoreKey::InvestmentDetails, &lots)?)
    }

    /// Finds the position of the lot keyed by (account, acquisition date)
    pub fn position_of(
        lots: &[InvestmentLot],
        account_id: &str,
        acquisition_date: NaiveDate,
    ) -> Option<usize> {
        lots.iter().position(|lot| {
            lot.account_id == account_id && lot.acquisition_date == acquisition_date
        })
    }

    /// All lots of one account, ordered by acquisition date
    pub fn lots_for_account(&self, account_id: &str) -> Result<Vec<InvestmentLot>> {
        let mut lots = self.load()?;
        lots.retain(|lot| lot.account_id == account_id);
        lots.sort_by_key(|lot| lot.acquisition_date);
        Ok(lots)
    }
}
