use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::investments_errors::{InvestmentError, Result};
use super::investments_model::{
    AccountPositions, InvestmentLot, InvestmentPosition, LotDisposal, LotStatus, NewPurchase,
    Revaluation, SaleRequest,
};
use super::investments_repository::InvestmentRepository;
use crate::accounts::{Account, AccountRepository, AccountService, AccountType};
use crate::constants::{
    balance_tolerance, AMOUNT_DECIMAL_PRECISION, MTM_CODE_SUFFIX, REALIZED_GAIN_LOSS_CODE,
    REALIZED_GAIN_LOSS_NAME, UNREALIZED_GAIN_LOSS_CODE, UNREALIZED_GAIN_LOSS_NAME,
};
use crate::journal::{
    EntryKind, EntrySide, JournalEntry, JournalService, NewJournalEntry, NewLineItem,
};
use crate::store::DocumentStore;

/// Service for the investment subledger: purchases, mark-to-market
/// revaluation and lot-based disposal.
pub struct InvestmentService {
    accounts: AccountService,
    account_repository: AccountRepository,
    journal: JournalService,
    repository: InvestmentRepository,
}

impl InvestmentService {
    /// Creates a new InvestmentService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let accounts = AccountService::new(store.clone());
        let account_repository = AccountRepository::new(store.clone());
        let journal = JournalService::new(store.clone());
        let repository = InvestmentRepository::new(store);
        Self {
            accounts,
            account_repository,
            journal,
            repository,
        }
    }

    /// Records an investment purchase.
    ///
    /// Posts a single-sided debit entry on the investment account for the
    /// cost basis (the cash leg arrives through reconciliation) and records
    /// the acquisition lot with fmv defaulted to cost.
    pub fn purchase(&self, purchase: NewPurchase) -> Result<(JournalEntry, InvestmentLot)> {
        purchase.validate()?;
        let account = self.investment_account(&purchase.account_id)?;

        let mut lots = self.repository.load()?;
        if InvestmentRepository::position_of(&lots, &account.id, purchase.acquisition_date)
            .is_some()
        {
            return Err(InvestmentError::DuplicateLot(format!(
                "{} on {}",
                account.name, purchase.acquisition_date
            )));
        }

        let cost_basis = purchase.cost_basis.round_dp(AMOUNT_DECIMAL_PRECISION);
        let entry = self.journal.post_generated(NewJournalEntry {
            date: purchase.acquisition_date,
            description: purchase_description(&account, &purchase.tranche),
            kind: EntryKind::InvestmentPurchase,
            line_items: vec![NewLineItem {
                account_id: account.id.clone(),
                description: format!("{} purchase", purchase.round),
                side: EntrySide::Debit,
                amount: cost_basis,
            }],
        })?;

        let lot = InvestmentLot {
            account_id: account.id.clone(),
            acquisition_date: purchase.acquisition_date,
            round: purchase.round,
            tranche: purchase.tranche,
            shares: purchase.shares,
            fmv_per_share: purchase
                .shares
                .map(|shares| (cost_basis / shares).round_dp(AMOUNT_DECIMAL_PRECISION)),
            fmv: cost_basis,
            cost_basis,
            status: LotStatus::Open,
        };
        debug!(
            "Recorded {} lot for {} at cost {}",
            lot.round, account.name, cost_basis
        );
        lots.push(lot.clone());
        self.repository.save(&lots)?;
        Ok((entry, lot))
    }

    /// Marks a lot to its new fair-market value.
    ///
    /// A nonzero delta against the lot's previous fmv (originally its cost)
    /// posts a fresh balanced adjusting entry between the paired MTM account
    /// and the Unrealized Gain/Loss account; there is no netting against
    /// prior adjustments. Returns the posted entry, or `None` when the value
    /// is unchanged.
    pub fn revalue(&self, revaluation: Revaluation) -> Result<Option<JournalEntry>> {
        revaluation.validate()?;
        let account = self.investment_account(&revaluation.account_id)?;

        let mut lots = self.repository.load()?;
        let index =
            InvestmentRepository::position_of(&lots, &account.id, revaluation.lot_date)
                .ok_or_else(|| {
                    InvestmentError::NotFound(format!(
                        "{} has no lot dated {}",
                        account.name, revaluation.lot_date
                    ))
                })?;
        if lots[index].status == LotStatus::Sold {
            return Err(InvestmentError::LotClosed(format!(
                "{} lot dated {}",
                account.name, revaluation.lot_date
            )));
        }

        let new_fmv = revaluation.fmv.round_dp(AMOUNT_DECIMAL_PRECISION);
        let delta = new_fmv - lots[index].fmv;

        let entry = if delta != Decimal::ZERO {
            let mtm = self.mtm_pair(&account)?;
            let unrealized = self.accounts.find_or_create_revenue_account(
                UNREALIZED_GAIN_LOSS_CODE,
                UNREALIZED_GAIN_LOSS_NAME,
                "Account for recording unrealized gains and losses",
            )?;
            let (mtm_side, unrealized_side) = if delta > Decimal::ZERO {
                (EntrySide::Debit, EntrySide::Credit)
            } else {
                (EntrySide::Credit, EntrySide::Debit)
            };
            debug!(
                "MTM adjustment for {}: fmv {} -> {} (delta {})",
                account.name, lots[index].fmv, new_fmv, delta
            );
            Some(self.journal.post_generated(NewJournalEntry {
                date: revaluation.date,
                description: format!("MTM adjustment for {}", account.name),
                kind: EntryKind::Standard,
                line_items: vec![
                    NewLineItem {
                        account_id: mtm.id,
                        description: "MTM adjustment".to_string(),
                        side: mtm_side,
                        amount: delta.abs(),
                    },
                    NewLineItem {
                        account_id: unrealized.id,
                        description: "MTM adjustment".to_string(),
                        side: unrealized_side,
                        amount: delta.abs(),
                    },
                ],
            })?)
        } else {
            None
        };

        let lot = &mut lots[index];
        if let Some(shares) = revaluation.shares {
            lot.shares = Some(shares);
        }
        lot.fmv_per_share = match (revaluation.fmv_per_share, lot.shares) {
            (Some(per_share), _) => Some(per_share),
            (None, Some(shares)) if shares > Decimal::ZERO => {
                Some((new_fmv / shares).round_dp(AMOUNT_DECIMAL_PRECISION))
            }
            (None, _) => lot.fmv_per_share,
        };
        lot.fmv = new_fmv;
        self.repository.save(&lots)?;
        Ok(entry)
    }

    /// Sells one or more lots of an investment account.
    ///
    /// Equity lots give up cost proportional to the shares sold and shrink
    /// (or disappear when fully sold); SAFE and convertible-note lots are
    /// sold whole and kept with status `Sold`. Posts one entry crediting the
    /// investment for the cost removed, debiting the proceeds account, and
    /// booking any realized gain or loss above the reporting tolerance.
    pub fn sell(&self, request: SaleRequest) -> Result<JournalEntry> {
        request.validate()?;
        let account = self.investment_account(&request.account_id)?;
        // Resolved up front so an unknown proceeds account fails before any
        // lot is touched.
        let proceeds_account = self.accounts.get_account(&request.proceeds_account_id)?;

        let mut lots = self.repository.load()?;
        let mut removed_indices: Vec<usize> = Vec::new();
        let mut total_cost_removed = Decimal::ZERO;
        let mut total_proceeds = Decimal::ZERO;

        for selection in &request.selections {
            let index =
                InvestmentRepository::position_of(&lots, &account.id, selection.lot_date)
                    .ok_or_else(|| {
                        InvestmentError::NotFound(format!(
                            "{} has no lot dated {}",
                            account.name, selection.lot_date
                        ))
                    })?;
            let lot = &mut lots[index];
            if lot.status == LotStatus::Sold {
                return Err(InvestmentError::LotClosed(format!(
                    "{} lot dated {}",
                    account.name, selection.lot_date
                )));
            }

            match &selection.disposal {
                LotDisposal::Shares {
                    sold,
                    price_per_share,
                } => {
                    let held = match lot.shares {
                        Some(shares) if lot.round.has_share_count() => shares,
                        _ => {
                            return Err(InvestmentError::InvalidData(format!(
                                "{} lot dated {} has no share count; sell it whole",
                                lot.round, selection.lot_date
                            )))
                        }
                    };
                    if *sold > held {
                        return Err(InvestmentError::OverSell {
                            available: held,
                            requested: *sold,
                        });
                    }

                    let cost_removed =
                        (lot.cost_basis * sold / held).round_dp(AMOUNT_DECIMAL_PRECISION);
                    total_cost_removed += cost_removed;
                    total_proceeds +=
                        (sold * price_per_share).round_dp(AMOUNT_DECIMAL_PRECISION);

                    if *sold == held {
                        // Marked Sold so a second selection of the same lot
                        // in this request is caught; removed after posting.
                        lot.status = LotStatus::Sold;
                        removed_indices.push(index);
                    } else {
                        let remaining = held - sold;
                        lot.fmv = (lot.fmv * remaining / held).round_dp(AMOUNT_DECIMAL_PRECISION);
                        lot.shares = Some(remaining);
                        lot.cost_basis -= cost_removed;
                        lot.status = LotStatus::PartiallySold;
                    }
                }
                LotDisposal::Whole { price } => {
                    if lot.round.has_share_count() {
                        return Err(InvestmentError::InvalidData(format!(
                            "Equity lot dated {} must be sold by share count",
                            selection.lot_date
                        )));
                    }
                    total_cost_removed += lot.cost_basis;
                    total_proceeds += price.round_dp(AMOUNT_DECIMAL_PRECISION);
                    lot.status = LotStatus::Sold;
                }
            }
        }

        let realized = total_proceeds - total_cost_removed;
        let mut line_items = Vec::new();
        if total_cost_removed > Decimal::ZERO {
            line_items.push(NewLineItem {
                account_id: account.id.clone(),
                description: "Cost basis removed".to_string(),
                side: EntrySide::Credit,
                amount: total_cost_removed,
            });
        }
        if total_proceeds > Decimal::ZERO {
            line_items.push(NewLineItem {
                account_id: proceeds_account.id.clone(),
                description: "Sale proceeds".to_string(),
                side: EntrySide::Debit,
                amount: total_proceeds,
            });
        }
        if realized.abs() > balance_tolerance() {
            let gain_loss = self.accounts.find_or_create_revenue_account(
                REALIZED_GAIN_LOSS_CODE,
                REALIZED_GAIN_LOSS_NAME,
                "Account for recording realized gains and losses",
            )?;
            line_items.push(NewLineItem {
                account_id: gain_loss.id,
                description: "Realized gain/loss".to_string(),
                side: if realized > Decimal::ZERO {
                    EntrySide::Credit
                } else {
                    EntrySide::Debit
                },
                amount: realized.abs(),
            });
        }

        debug!(
            "Selling {} lot(s) of {}: cost removed {}, proceeds {}, realized {}",
            request.selections.len(),
            account.name,
            total_cost_removed,
            total_proceeds,
            realized
        );
        let entry = self.journal.post_generated(NewJournalEntry {
            date: request.sale_date,
            description: format!("Investment sale - {}", account.name),
            kind: EntryKind::InvestmentSale,
            line_items,
        })?;

        removed_indices.sort_unstable();
        for index in removed_indices.into_iter().rev() {
            lots.remove(index);
        }
        self.repository.save(&lots)?;
        Ok(entry)
    }

    /// Open and partially sold lots of every investment account, with
    /// per-account subtotals. Accounts without lots are skipped.
    pub fn list_positions(&self) -> Result<Vec<AccountPositions>> {
        let investment_accounts = self.accounts.list_by_type(AccountType::Investment)?;
        let mut positions = Vec::new();

        for account in investment_accounts {
            let lots = self.repository.lots_for_account(&account.id)?;
            let open_lots: Vec<InvestmentLot> = lots
                .into_iter()
                .filter(|lot| lot.status != LotStatus::Sold)
                .collect();
            if open_lots.is_empty() {
                continue;
            }

            let rows: Vec<InvestmentPosition> = open_lots
                .iter()
                .map(|lot| InvestmentPosition {
                    account_id: account.id.clone(),
                    account_label: account.display_label(),
                    acquisition_date: lot.acquisition_date,
                    round: lot.round,
                    tranche: lot.tranche.clone(),
                    status: lot.status,
                    shares: lot.shares,
                    cost_per_share: lot.shares.and_then(|shares| {
                        (shares > Decimal::ZERO)
                            .then(|| (lot.cost_basis / shares).round_dp(AMOUNT_DECIMAL_PRECISION))
                    }),
                    fmv_per_share: lot.fmv_per_share,
                    cost: lot.cost_basis,
                    fmv: lot.fmv,
                    unrealized_gain_loss: lot.unrealized_gain_loss(),
                })
                .collect();

            let total_cost: Decimal = rows.iter().map(|row| row.cost).sum();
            let total_fmv: Decimal = rows.iter().map(|row| row.fmv).sum();
            positions.push(AccountPositions {
                account_id: account.id.clone(),
                account_label: account.display_label(),
                lots: rows,
                total_cost,
                total_fmv,
                total_unrealized_gain_loss: total_fmv - total_cost,
            });
        }
        Ok(positions)
    }

    fn investment_account(&self, account_id: &str) -> Result<Account> {
        let account = self.accounts.get_account(account_id)?;
        if account.account_type != AccountType::Investment {
            return Err(InvestmentError::InvalidData(format!(
                "Account {} is not an Investment account",
                account.display_label()
            )));
        }
        Ok(account)
    }

    fn mtm_pair(&self, investment: &Account) -> Result<Account> {
        let pair_code = format!("{}{}", investment.code, MTM_CODE_SUFFIX);
        self.account_repository
            .find_by_code(&pair_code)?
            .filter(|account| account.account_type == AccountType::Mtm)
            .ok_or_else(|| {
                InvestmentError::InvalidData(format!(
                    "No MTM pair account ({}) for {}",
                    pair_code, investment.name
                ))
            })
    }
}

fn purchase_description(account: &Account, tranche: &str) -> String {
    if tranche.trim().is_empty() {
        format!("Investment purchase - {}", account.name)
    } else {
        format!("Investment purchase - {} ({})", account.name, tranche.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::investments_model::{InvestmentRound, LotSelection};
    use crate::accounts::NewAccount;
    use crate::constants::UNREALIZED_GAIN_LOSS_CODE;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        service: InvestmentService,
        accounts: AccountService,
        journal: JournalService,
        investment_id: String,
        cash_id: String,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let accounts = AccountService::new(store.clone());
        let investment_id = accounts
            .create_account(NewAccount {
                code: "5000".to_string(),
                name: "Acme Corp".to_string(),
                account_type: AccountType::Investment,
                description: String::new(),
            })
            .unwrap()
            .id;
        let cash_id = accounts
            .create_account(NewAccount {
                code: "1000".to_string(),
                name: "Cash".to_string(),
                account_type: AccountType::CurrentAsset,
                description: String::new(),
            })
            .unwrap()
            .id;
        Fixture {
            service: InvestmentService::new(store.clone()),
            accounts,
            journal: JournalService::new(store),
            investment_id,
            cash_id,
        }
    }

    fn equity_purchase(fixture: &Fixture, date_str: &str, shares: Decimal, cost: Decimal) {
        fixture
            .service
            .purchase(NewPurchase {
                account_id: fixture.investment_id.clone(),
                acquisition_date: date(date_str),
                round: InvestmentRound::Equity,
                tranche: "Series A".to_string(),
                shares: Some(shares),
                cost_basis: cost,
            })
            .unwrap();
    }

    #[test]
    fn purchase_posts_single_sided_entry_and_records_lot() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        let entries = fixture.journal.list_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::InvestmentPurchase);
        assert!(!entries[0].is_balanced());
        assert_eq!(entries[0].total_debits(), dec!(1000.00));

        let positions = fixture.service.list_positions().unwrap();
        assert_eq!(positions.len(), 1);
        let lot = &positions[0].lots[0];
        assert_eq!(lot.cost, dec!(1000.00));
        assert_eq!(lot.fmv, dec!(1000.00));
        assert_eq!(lot.cost_per_share, Some(dec!(10.00)));
        assert_eq!(lot.status, LotStatus::Open);
    }

    #[test]
    fn duplicate_lot_for_same_date_is_rejected() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        let err = fixture
            .service
            .purchase(NewPurchase {
                account_id: fixture.investment_id.clone(),
                acquisition_date: date("2024-01-15"),
                round: InvestmentRound::Equity,
                tranche: String::new(),
                shares: Some(dec!(10)),
                cost_basis: dec!(500.00),
            })
            .unwrap_err();
        assert!(matches!(err, InvestmentError::DuplicateLot(_)));
    }

    #[test]
    fn revaluation_posts_mtm_adjustments_against_the_new_baseline() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        // 1000 -> 1500: MTM debited 500, Unrealized credited 500.
        let entry = fixture
            .service
            .revalue(Revaluation {
                account_id: fixture.investment_id.clone(),
                lot_date: date("2024-01-15"),
                date: date("2024-06-30"),
                shares: None,
                fmv_per_share: None,
                fmv: dec!(1500.00),
            })
            .unwrap()
            .expect("nonzero delta posts an entry");
        assert_eq!(entry.line_items.len(), 2);
        let mtm_line = entry
            .line_items
            .iter()
            .find(|line| line.account_type == AccountType::Mtm)
            .unwrap();
        assert_eq!(mtm_line.side, EntrySide::Debit);
        assert_eq!(mtm_line.amount, dec!(500.00));
        let unrealized_line = entry
            .line_items
            .iter()
            .find(|line| line.account_type == AccountType::Revenue)
            .unwrap();
        assert_eq!(unrealized_line.side, EntrySide::Credit);
        assert_eq!(unrealized_line.amount, dec!(500.00));

        // 1500 -> 1200: delta is -300 against the new baseline.
        let entry = fixture
            .service
            .revalue(Revaluation {
                account_id: fixture.investment_id.clone(),
                lot_date: date("2024-01-15"),
                date: date("2024-09-30"),
                shares: None,
                fmv_per_share: None,
                fmv: dec!(1200.00),
            })
            .unwrap()
            .unwrap();
        let mtm_line = entry
            .line_items
            .iter()
            .find(|line| line.account_type == AccountType::Mtm)
            .unwrap();
        assert_eq!(mtm_line.side, EntrySide::Credit);
        assert_eq!(mtm_line.amount, dec!(300.00));

        // The UGL account is created once and reused.
        let revenue_accounts = fixture
            .accounts
            .list_by_type(AccountType::Revenue)
            .unwrap();
        assert_eq!(
            revenue_accounts
                .iter()
                .filter(|account| account.code == UNREALIZED_GAIN_LOSS_CODE)
                .count(),
            1
        );
    }

    #[test]
    fn unchanged_fmv_updates_the_lot_without_an_entry() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        let entry = fixture
            .service
            .revalue(Revaluation {
                account_id: fixture.investment_id.clone(),
                lot_date: date("2024-01-15"),
                date: date("2024-06-30"),
                shares: Some(dec!(100)),
                fmv_per_share: Some(dec!(10.00)),
                fmv: dec!(1000.00),
            })
            .unwrap();
        assert!(entry.is_none());
        assert_eq!(fixture.journal.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn partial_equity_sale_books_realized_gain_and_shrinks_the_lot() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        // 40 shares at $15 against a $10 cost: gain 200.
        let entry = fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-07-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![LotSelection {
                    lot_date: date("2024-01-15"),
                    disposal: LotDisposal::Shares {
                        sold: dec!(40),
                        price_per_share: dec!(15.00),
                    },
                }],
            })
            .unwrap();

        assert_eq!(entry.kind, EntryKind::InvestmentSale);
        let investment_line = entry
            .line_items
            .iter()
            .find(|line| line.account_id == fixture.investment_id)
            .unwrap();
        assert_eq!(investment_line.side, EntrySide::Credit);
        assert_eq!(investment_line.amount, dec!(400.00));
        let proceeds_line = entry
            .line_items
            .iter()
            .find(|line| line.account_id == fixture.cash_id)
            .unwrap();
        assert_eq!(proceeds_line.side, EntrySide::Debit);
        assert_eq!(proceeds_line.amount, dec!(600.00));
        let gain_line = entry
            .line_items
            .iter()
            .find(|line| line.account_type == AccountType::Revenue)
            .unwrap();
        assert_eq!(gain_line.side, EntrySide::Credit);
        assert_eq!(gain_line.amount, dec!(200.00));
        assert!(entry.is_balanced());

        let positions = fixture.service.list_positions().unwrap();
        let lot = &positions[0].lots[0];
        assert_eq!(lot.shares, Some(dec!(60)));
        assert_eq!(lot.cost, dec!(600.00));
        assert_eq!(lot.status, LotStatus::PartiallySold);
    }

    #[test]
    fn full_equity_sale_removes_the_lot() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-07-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![LotSelection {
                    lot_date: date("2024-01-15"),
                    disposal: LotDisposal::Shares {
                        sold: dec!(100),
                        price_per_share: dec!(10.00),
                    },
                }],
            })
            .unwrap();

        assert!(fixture.service.list_positions().unwrap().is_empty());
    }

    #[test]
    fn safe_lot_is_sold_whole_and_kept_with_sold_status() {
        let fixture = fixture();
        fixture
            .service
            .purchase(NewPurchase {
                account_id: fixture.investment_id.clone(),
                acquisition_date: date("2024-02-01"),
                round: InvestmentRound::Safe,
                tranche: String::new(),
                shares: None,
                cost_basis: dec!(25000.00),
            })
            .unwrap();

        let entry = fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-08-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![LotSelection {
                    lot_date: date("2024-02-01"),
                    disposal: LotDisposal::Whole {
                        price: dec!(20000.00),
                    },
                }],
            })
            .unwrap();

        // Realized loss of 5000 debits the gain/loss account.
        let loss_line = entry
            .line_items
            .iter()
            .find(|line| line.account_type == AccountType::Revenue)
            .unwrap();
        assert_eq!(loss_line.side, EntrySide::Debit);
        assert_eq!(loss_line.amount, dec!(5000.00));

        // The lot survives with an explicit Sold status, not an fmv of 0,
        // so it no longer shows among open positions.
        let positions = fixture.service.list_positions().unwrap();
        assert!(positions.is_empty());

        let err = fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-09-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![LotSelection {
                    lot_date: date("2024-02-01"),
                    disposal: LotDisposal::Whole { price: dec!(1.00) },
                }],
            })
            .unwrap_err();
        assert!(matches!(err, InvestmentError::LotClosed(_)));
    }

    #[test]
    fn over_selling_a_lot_is_rejected() {
        let fixture = fixture();
        equity_purchase(&fixture, "2024-01-15", dec!(100), dec!(1000.00));

        let err = fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-07-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![LotSelection {
                    lot_date: date("2024-01-15"),
                    disposal: LotDisposal::Shares {
                        sold: dec!(150),
                        price_per_share: dec!(15.00),
                    },
                }],
            })
            .unwrap_err();
        assert!(matches!(err, InvestmentError::OverSell { .. }));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let fixture = fixture();
        let err = fixture
            .service
            .sell(SaleRequest {
                account_id: fixture.investment_id.clone(),
                sale_date: date("2024-07-01"),
                proceeds_account_id: fixture.cash_id.clone(),
                selections: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, InvestmentError::InvalidData(_)));
    }
}
