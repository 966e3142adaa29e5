use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::investments_errors::{InvestmentError, Result};

/// Funding instrument for an acquisition lot.
///
/// SAFEs and convertible notes have no share count until conversion; they
/// are tracked by dollar amount only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentRound {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "Convertible Note")]
    ConvertibleNote,
    #[serde(rename = "Equity")]
    Equity,
}

impl InvestmentRound {
    pub fn has_share_count(&self) -> bool {
        matches!(self, InvestmentRound::Equity)
    }
}

impl std::fmt::Display for InvestmentRound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentRound::Safe => f.write_str("SAFE"),
            InvestmentRound::ConvertibleNote => f.write_str("Convertible Note"),
            InvestmentRound::Equity => f.write_str("Equity"),
        }
    }
}

/// Explicit lot lifecycle state.
///
/// Replaces the legacy `fmv == 0` sold sentinel, which could not tell a
/// closed SAFE from one legitimately marked down to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LotStatus {
    #[default]
    Open,
    PartiallySold,
    Sold,
}

/// One acquisition lot of an investment account.
///
/// Logically keyed by (account_id, acquisition_date); `fmv` starts at the
/// cost basis and moves only through revaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentLot {
    pub account_id: String,
    pub acquisition_date: NaiveDate,
    pub round: InvestmentRound,
    #[serde(default)]
    pub tranche: String,
    pub shares: Option<Decimal>,
    pub fmv_per_share: Option<Decimal>,
    pub fmv: Decimal,
    pub cost_basis: Decimal,
    #[serde(default)]
    pub status: LotStatus,
}

impl InvestmentLot {
    pub fn unrealized_gain_loss(&self) -> Decimal {
        self.fmv - self.cost_basis
    }
}

/// Input model for recording a new investment purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub account_id: String,
    pub acquisition_date: NaiveDate,
    pub round: InvestmentRound,
    #[serde(default)]
    pub tranche: String,
    pub shares: Option<Decimal>,
    pub cost_basis: Decimal,
}

impl NewPurchase {
    /// Validates the purchase data
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(InvestmentError::InvalidData(
                "Account ID cannot be empty".to_string(),
            ));
        }
        if self.cost_basis <= Decimal::ZERO {
            return Err(InvestmentError::InvalidData(
                "Cost basis must be positive".to_string(),
            ));
        }
        match (self.round.has_share_count(), self.shares) {
            (true, None) => Err(InvestmentError::InvalidData(
                "Equity purchases need a share count".to_string(),
            )),
            (true, Some(shares)) if shares <= Decimal::ZERO => Err(
                InvestmentError::InvalidData("Share count must be positive".to_string()),
            ),
            (false, Some(_)) => Err(InvestmentError::InvalidData(format!(
                "{} purchases have no share count",
                self.round
            ))),
            _ => Ok(()),
        }
    }
}

/// Input model for marking a lot to market
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revaluation {
    pub account_id: String,
    /// Acquisition date identifying the lot.
    pub lot_date: NaiveDate,
    /// Date the adjusting entry is posted under.
    pub date: NaiveDate,
    pub shares: Option<Decimal>,
    pub fmv_per_share: Option<Decimal>,
    /// New absolute fair-market value (not a delta).
    pub fmv: Decimal,
}

impl Revaluation {
    /// Validates the revaluation data
    pub fn validate(&self) -> Result<()> {
        if self.fmv < Decimal::ZERO {
            return Err(InvestmentError::InvalidData(
                "Fair-market value cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// How one selected lot is disposed of in a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LotDisposal {
    /// Sell a share count from an equity lot at a per-share price.
    Shares {
        sold: Decimal,
        price_per_share: Decimal,
    },
    /// Sell a SAFE or convertible-note lot whole at a flat price.
    Whole { price: Decimal },
}

/// One lot selected for disposal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSelection {
    pub lot_date: NaiveDate,
    pub disposal: LotDisposal,
}

/// Input model for selling investment lots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub account_id: String,
    pub sale_date: NaiveDate,
    /// Cash/clearing account debited with the proceeds.
    pub proceeds_account_id: String,
    pub selections: Vec<LotSelection>,
}

impl SaleRequest {
    /// Validates the sale request
    pub fn validate(&self) -> Result<()> {
        if self.selections.is_empty() {
            return Err(InvestmentError::InvalidData(
                "A sale needs at least one selected lot".to_string(),
            ));
        }
        if self.proceeds_account_id.trim().is_empty() {
            return Err(InvestmentError::InvalidData(
                "A proceeds account is required".to_string(),
            ));
        }
        for selection in &self.selections {
            match &selection.disposal {
                LotDisposal::Shares {
                    sold,
                    price_per_share,
                } => {
                    if *sold <= Decimal::ZERO {
                        return Err(InvestmentError::InvalidData(
                            "Shares sold must be positive".to_string(),
                        ));
                    }
                    if *price_per_share < Decimal::ZERO {
                        return Err(InvestmentError::InvalidData(
                            "Sale price cannot be negative".to_string(),
                        ));
                    }
                }
                LotDisposal::Whole { price } => {
                    if *price < Decimal::ZERO {
                        return Err(InvestmentError::InvalidData(
                            "Sale price cannot be negative".to_string(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// One lot as shown on the investments view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPosition {
    pub account_id: String,
    pub account_label: String,
    pub acquisition_date: NaiveDate,
    pub round: InvestmentRound,
    pub tranche: String,
    pub status: LotStatus,
    pub shares: Option<Decimal>,
    pub cost_per_share: Option<Decimal>,
    pub fmv_per_share: Option<Decimal>,
    pub cost: Decimal,
    pub fmv: Decimal,
    pub unrealized_gain_loss: Decimal,
}

/// Open lots of one investment account with subtotals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPositions {
    pub account_id: String,
    pub account_label: String,
    pub lots: Vec<InvestmentPosition>,
    pub total_cost: Decimal,
    pub total_fmv: Decimal,
    pub total_unrealized_gain_loss: Decimal,
}
