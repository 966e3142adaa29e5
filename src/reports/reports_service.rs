use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::warn;
use rust_decimal::Decimal;

use super::reports_errors::{ReportError, Result};
use super::reports_model::{
    BalanceSheetReport, GeneralLedgerReport, LedgerSection, ProfitLossReport, ReportRow,
    ReportSection, TrialBalanceReport, TrialBalanceRow,
};
use crate::accounts::{Account, AccountCategory, AccountRepository, AccountType};
use crate::balances::{balances_for, category_total, running_balance};
use crate::constants::balance_tolerance;
use crate::journal::{JournalEntry, JournalService};
use crate::store::DocumentStore;

/// Service generating the canned financial reports. Pure reads; every report
/// is a function of the chart snapshot and a date-filtered entry set.
pub struct ReportService {
    accounts: AccountRepository,
    journal: JournalService,
}

impl ReportService {
    /// Creates a new ReportService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let accounts = AccountRepository::new(store.clone());
        let journal = JournalService::new(store);
        Self { accounts, journal }
    }

    /// Balance sheet as of `as_of`.
    ///
    /// Equity is direct equity balances plus retained earnings (years before
    /// the as-of year) plus current-year earnings. An imbalance beyond 0.01
    /// is logged and flagged, never fatal.
    pub fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport> {
        let accounts = self.accounts.list(None)?;
        let entries = self.journal.entries_as_of(as_of)?;
        let balances = balances_for(&accounts, &entries);

        let asset_sections = subtype_sections(&accounts, &balances, &AccountType::ASSET_TYPES);
        let total_assets = category_total(&accounts, &balances, AccountCategory::Asset);
        let liability_sections =
            subtype_sections(&accounts, &balances, &AccountType::LIABILITY_TYPES);
        let total_liabilities = category_total(&accounts, &balances, AccountCategory::Liability);

        let equity_rows = nonzero_rows(&accounts, &balances, |account| {
            account.account_type.category() == AccountCategory::Equity
        });
        let direct_equity = category_total(&accounts, &balances, AccountCategory::Equity);

        let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).ok_or_else(|| {
            ReportError::InvalidData(format!("No calendar year start for {}", as_of))
        })?;
        let prior_entries: Vec<JournalEntry> = entries
            .iter()
            .filter(|entry| entry.date < year_start)
            .cloned()
            .collect();
        let current_entries: Vec<JournalEntry> = entries
            .iter()
            .filter(|entry| entry.date >= year_start)
            .cloned()
            .collect();
        let retained_earnings = earnings(&accounts, &prior_entries);
        let current_year_earnings = earnings(&accounts, &current_entries);

        let total_equity = direct_equity + retained_earnings + current_year_earnings;
        let balanced =
            (total_assets - (total_liabilities + total_equity)).abs() <= balance_tolerance();
        if !balanced {
            warn!(
                "Balance sheet as of {} does not balance: assets {} vs liabilities+equity {}",
                as_of,
                total_assets,
                total_liabilities + total_equity
            );
        }

        Ok(BalanceSheetReport {
            as_of,
            asset_sections,
            total_assets,
            liability_sections,
            total_liabilities,
            equity_rows,
            retained_earnings,
            current_year_earnings,
            total_equity,
            balanced,
        })
    }

    /// Profit and loss over `[start, end]`.
    pub fn profit_and_loss(&self, start: NaiveDate, end: NaiveDate) -> Result<ProfitLossReport> {
        validate_range(start, end)?;
        let accounts = self.accounts.list(None)?;
        let entries = self.journal.entries_in_range(start, end)?;
        let balances = balances_for(&accounts, &entries);

        let revenue_rows = nonzero_rows(&accounts, &balances, |account| {
            account.account_type.category() == AccountCategory::Revenue
        });
        let expense_rows = nonzero_rows(&accounts, &balances, |account| {
            account.account_type.category() == AccountCategory::Expense
        });
        let total_revenue = category_total(&accounts, &balances, AccountCategory::Revenue);
        let total_expenses = category_total(&accounts, &balances, AccountCategory::Expense);

        Ok(ProfitLossReport {
            start,
            end,
            revenue_rows,
            total_revenue,
            expense_rows,
            total_expenses,
            net_income: total_revenue - total_expenses,
        })
    }

    /// Trial balance as of `as_of`: every account with a nonzero balance in
    /// its normal-side column.
    pub fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport> {
        let accounts = self.accounts.list(None)?;
        let entries = self.journal.entries_as_of(as_of)?;
        let balances = balances_for(&accounts, &entries);

        let mut rows = Vec::new();
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        for account in &accounts {
            let balance = balances.get(&account.id).copied().unwrap_or_default();
            if balance == Decimal::ZERO {
                continue;
            }
            // A negative balance lands in the opposite column.
            let on_normal_side = balance >= Decimal::ZERO;
            let magnitude = balance.abs();
            let (debit, credit) = if account.account_type.is_debit_normal() == on_normal_side {
                (Some(magnitude), None)
            } else {
                (None, Some(magnitude))
            };
            total_debits += debit.unwrap_or_default();
            total_credits += credit.unwrap_or_default();
            rows.push(TrialBalanceRow {
                account_label: account.display_label(),
                debit,
                credit,
            });
        }

        let balanced = (total_debits - total_credits).abs() <= balance_tolerance();
        Ok(TrialBalanceReport {
            as_of,
            rows,
            total_debits,
            total_credits,
            balanced,
        })
    }

    /// General ledger over `[start, end]`, one section per account with
    /// activity, optionally limited to a single account.
    pub fn general_ledger(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        account_filter: Option<&str>,
    ) -> Result<GeneralLedgerReport> {
        validate_range(start, end)?;
        let mut accounts = self.accounts.list(None)?;
        if let Some(account_id) = account_filter {
            accounts.retain(|account| account.id == account_id);
            if accounts.is_empty() {
                return Err(ReportError::InvalidData(format!(
                    "Unknown account filter {}",
                    account_id
                )));
            }
        }
        let entries = self.journal.entries_in_range(start, end)?;

        let mut sections = Vec::new();
        for account in &accounts {
            let lines = running_balance(&account.id, &entries);
            if lines.is_empty() {
                continue;
            }
            let closing_balance = lines.last().map(|line| line.balance).unwrap_or_default();
            sections.push(LedgerSection {
                account_label: account.display_label(),
                lines,
                closing_balance,
            });
        }
        Ok(GeneralLedgerReport {
            start,
            end,
            sections,
        })
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(ReportError::InvalidData(format!(
            "Range start {} is after end {}",
            start, end
        )));
    }
    Ok(())
}

/// Revenue minus expenses over one entry subset.
fn earnings(accounts: &[Account], entries: &[JournalEntry]) -> Decimal {
    let balances = balances_for(accounts, entries);
    category_total(accounts, &balances, AccountCategory::Revenue)
        - category_total(accounts, &balances, AccountCategory::Expense)
}

/// One section per listed subtype, holding its nonzero-balance accounts.
/// Subtypes with no activity are dropped.
fn subtype_sections(
    accounts: &[Account],
    balances: &HashMap<String, Decimal>,
    subtypes: &[AccountType],
) -> Vec<ReportSection> {
    subtypes
        .iter()
        .filter_map(|subtype| {
            let rows = nonzero_rows(accounts, balances, |account| {
                account.account_type == *subtype
            });
            if rows.is_empty() {
                return None;
            }
            let subtotal = rows.iter().map(|row| row.amount).sum();
            Some(ReportSection {
                title: subtype.to_string(),
                rows,
                subtotal,
            })
        })
        .collect()
}

fn nonzero_rows(
    accounts: &[Account],
    balances: &HashMap<String, Decimal>,
    select: impl Fn(&Account) -> bool,
) -> Vec<ReportRow> {
    accounts
        .iter()
        .filter(|account| select(account))
        .filter_map(|account| {
            let amount = balances.get(&account.id).copied().unwrap_or_default();
            if amount == Decimal::ZERO {
                return None;
            }
            Some(ReportRow {
                label: account.display_label(),
                amount,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountService, NewAccount};
    use crate::journal::{EntryKind, EntrySide, NewJournalEntry, NewLineItem};
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        reports: ReportService,
        journal: JournalService,
        accounts: AccountService,
    }

    fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            reports: ReportService::new(store.clone()),
            journal: JournalService::new(store.clone()),
            accounts: AccountService::new(store),
        }
    }

    fn create_account(
        accounts: &AccountService,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> String {
        accounts
            .create_account(NewAccount {
                code: code.to_string(),
                name: name.to_string(),
                account_type,
                description: String::new(),
            })
            .unwrap()
            .id
    }

    fn post(
        journal: &JournalService,
        d: &str,
        debit_account: &str,
        credit_account: &str,
        amount: Decimal,
    ) {
        journal
            .post_entry(NewJournalEntry {
                date: date(d),
                description: String::new(),
                kind: EntryKind::Standard,
                line_items: vec![
                    NewLineItem {
                        account_id: debit_account.to_string(),
                        description: String::new(),
                        side: EntrySide::Debit,
                        amount,
                    },
                    NewLineItem {
                        account_id: credit_account.to_string(),
                        description: String::new(),
                        side: EntrySide::Credit,
                        amount,
                    },
                ],
            })
            .unwrap();
    }

    #[test]
    fn balance_sheet_balances_through_current_year_earnings() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let equity = create_account(&f.accounts, "3000", "Capital", AccountType::Equity);
        let expense = create_account(&f.accounts, "6000", "Rent", AccountType::Expense);

        post(&f.journal, "2024-01-10", &cash, &equity, dec!(500.00));
        post(&f.journal, "2024-02-01", &expense, &cash, dec!(100.00));

        let report = f.reports.balance_sheet(date("2024-03-01")).unwrap();
        assert_eq!(report.total_assets, dec!(400.00));
        assert_eq!(report.current_year_earnings, dec!(-100.00));
        assert_eq!(report.retained_earnings, dec!(0));
        assert_eq!(report.total_equity, dec!(400.00));
        assert!(report.balanced);
    }

    #[test]
    fn prior_year_earnings_roll_into_retained() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let sales = create_account(&f.accounts, "4000", "Sales", AccountType::Sales);

        post(&f.journal, "2023-06-15", &cash, &sales, dec!(800.00));
        post(&f.journal, "2024-01-20", &cash, &sales, dec!(200.00));

        let report = f.reports.balance_sheet(date("2024-12-31")).unwrap();
        assert_eq!(report.retained_earnings, dec!(800.00));
        assert_eq!(report.current_year_earnings, dec!(200.00));
        assert_eq!(report.total_assets, dec!(1000.00));
        assert!(report.balanced);
    }

    #[test]
    fn balance_sheet_groups_assets_by_subtype_in_fixed_order() {
        let f = setup();
        let bank = create_account(&f.accounts, "1100", "Checking", AccountType::BankAccount);
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let equity = create_account(&f.accounts, "3000", "Capital", AccountType::Equity);

        post(&f.journal, "2024-01-10", &cash, &equity, dec!(100.00));
        post(&f.journal, "2024-01-11", &bank, &equity, dec!(250.00));

        let report = f.reports.balance_sheet(date("2024-02-01")).unwrap();
        let titles: Vec<&str> = report
            .asset_sections
            .iter()
            .map(|section| section.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Current Asset", "Bank Account"]);
        assert_eq!(report.asset_sections[1].subtotal, dec!(250.00));
    }

    #[test]
    fn profit_and_loss_nets_revenue_against_expenses() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let sales = create_account(&f.accounts, "4000", "Sales", AccountType::Sales);
        let rent = create_account(&f.accounts, "6000", "Rent", AccountType::Expense);

        post(&f.journal, "2024-01-10", &cash, &sales, dec!(900.00));
        post(&f.journal, "2024-01-15", &rent, &cash, dec!(300.00));
        // Outside the range, must not count.
        post(&f.journal, "2024-04-01", &cash, &sales, dec!(999.00));

        let report = f
            .reports
            .profit_and_loss(date("2024-01-01"), date("2024-03-31"))
            .unwrap();
        assert_eq!(report.total_revenue, dec!(900.00));
        assert_eq!(report.total_expenses, dec!(300.00));
        assert_eq!(report.net_income, dec!(600.00));
    }

    #[test]
    fn trial_balance_splits_columns_by_normal_side() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let sales = create_account(&f.accounts, "4000", "Sales", AccountType::Sales);

        post(&f.journal, "2024-01-10", &cash, &sales, dec!(150.00));

        let report = f.reports.trial_balance(date("2024-02-01")).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].debit, Some(dec!(150.00)));
        assert_eq!(report.rows[0].credit, None);
        assert_eq!(report.rows[1].credit, Some(dec!(150.00)));
        assert_eq!(report.total_debits, report.total_credits);
        assert!(report.balanced);
    }

    #[test]
    fn general_ledger_runs_raw_debit_credit_balances() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let sales = create_account(&f.accounts, "4000", "Sales", AccountType::Sales);

        post(&f.journal, "2024-01-10", &cash, &sales, dec!(100.00));
        post(&f.journal, "2024-01-20", &cash, &sales, dec!(40.00));

        let report = f
            .reports
            .general_ledger(date("2024-01-01"), date("2024-01-31"), Some(sales.as_str()))
            .unwrap();
        assert_eq!(report.sections.len(), 1);
        let section = &report.sections[0];
        // Credit-normal account, but the ledger view still runs raw
        // debit(+)/credit(-).
        assert_eq!(section.lines[0].balance, dec!(-100.00));
        assert_eq!(section.closing_balance, dec!(-140.00));
    }

    #[test]
    fn reports_flatten_to_exportable_tables() {
        let f = setup();
        let cash = create_account(&f.accounts, "1000", "Cash", AccountType::CurrentAsset);
        let equity = create_account(&f.accounts, "3000", "Capital", AccountType::Equity);
        post(&f.journal, "2024-01-10", &cash, &equity, dec!(500.00));

        let table = f
            .reports
            .balance_sheet(date("2024-02-01"))
            .unwrap()
            .to_table();
        assert_eq!(table.headers, vec!["Description", "Amount"]);
        assert!(!table.rows.is_empty());

        let trial = f.reports.trial_balance(date("2024-02-01")).unwrap().to_table();
        assert_eq!(trial.headers, vec!["Account", "Debit", "Credit"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let f = setup();
        assert!(matches!(
            f.reports.profit_and_loss(date("2024-02-01"), date("2024-01-01")),
            Err(ReportError::InvalidData(_))
        ));
    }
}
