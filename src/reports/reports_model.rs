use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::balances::LedgerLine;
use crate::tabular::{Cell, Table};

/// One labeled amount line of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub amount: Decimal,
}

/// A titled group of report rows with its subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
    pub subtotal: Decimal,
}

/// Balance sheet as of a date.
///
/// Asset and liability sections appear in the fixed subtype order the
/// statement has always used; subtypes with no balances are omitted. Equity
/// combines direct equity balances with retained earnings (years before the
/// as-of year) and current-year earnings (Jan 1 of the as-of year onward).
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheetReport {
    pub as_of: NaiveDate,
    pub asset_sections: Vec<ReportSection>,
    pub total_assets: Decimal,
    pub liability_sections: Vec<ReportSection>,
    pub total_liabilities: Decimal,
    pub equity_rows: Vec<ReportRow>,
    pub retained_earnings: Decimal,
    pub current_year_earnings: Decimal,
    pub total_equity: Decimal,
    /// Whether assets equal liabilities plus equity within 0.01.
    pub balanced: bool,
}

impl BalanceSheetReport {
    /// Flattens the statement into an exportable table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            &format!("Balance Sheet as of {}", self.as_of),
            &["Description", "Amount"],
        );
        table.push_row(vec![Cell::Text("Assets".to_string()), Cell::Empty]);
        push_sections(&mut table, &self.asset_sections);
        push_amount_row(&mut table, "Total Assets", self.total_assets);

        table.push_row(vec![Cell::Text("Liabilities".to_string()), Cell::Empty]);
        push_sections(&mut table, &self.liability_sections);
        push_amount_row(&mut table, "Total Liabilities", self.total_liabilities);

        table.push_row(vec![Cell::Text("Equity".to_string()), Cell::Empty]);
        for row in &self.equity_rows {
            push_amount_row(&mut table, &row.label, row.amount);
        }
        push_amount_row(&mut table, "Retained Earnings", self.retained_earnings);
        push_amount_row(
            &mut table,
            "Current Year Earnings",
            self.current_year_earnings,
        );
        push_amount_row(&mut table, "Total Equity", self.total_equity);
        table
    }
}

/// Profit and loss over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitLossReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub revenue_rows: Vec<ReportRow>,
    pub total_revenue: Decimal,
    pub expense_rows: Vec<ReportRow>,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
}

impl ProfitLossReport {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            &format!("Profit & Loss {} to {}", self.start, self.end),
            &["Description", "Amount"],
        );
        table.push_row(vec![Cell::Text("Revenue".to_string()), Cell::Empty]);
        for row in &self.revenue_rows {
            push_amount_row(&mut table, &row.label, row.amount);
        }
        push_amount_row(&mut table, "Total Revenue", self.total_revenue);

        table.push_row(vec![Cell::Text("Expenses".to_string()), Cell::Empty]);
        for row in &self.expense_rows {
            push_amount_row(&mut table, &row.label, row.amount);
        }
        push_amount_row(&mut table, "Total Expenses", self.total_expenses);
        push_amount_row(&mut table, "Net Income", self.net_income);
        table
    }
}

/// One trial-balance line: the account's balance in its normal-side column.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBalanceRow {
    pub account_label: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

/// Trial balance as of a date.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBalanceReport {
    pub as_of: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    /// Whether the debit and credit columns agree within 0.01.
    pub balanced: bool,
}

impl TrialBalanceReport {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            &format!("Trial Balance as of {}", self.as_of),
            &["Account", "Debit", "Credit"],
        );
        for row in &self.rows {
            table.push_row(vec![
                Cell::Text(row.account_label.clone()),
                decimal_cell(row.debit),
                decimal_cell(row.credit),
            ]);
        }
        table.push_row(vec![
            Cell::Text("Totals".to_string()),
            decimal_cell(Some(self.total_debits)),
            decimal_cell(Some(self.total_credits)),
        ]);
        table
    }
}

/// One account's slice of the general ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSection {
    pub account_label: String,
    pub lines: Vec<LedgerLine>,
    pub closing_balance: Decimal,
}

/// General ledger over a date range, one section per account with activity.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralLedgerReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sections: Vec<LedgerSection>,
}

impl GeneralLedgerReport {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            &format!("General Ledger {} to {}", self.start, self.end),
            &["Account", "Date", "Description", "Debit", "Credit", "Balance"],
        );
        for section in &self.sections {
            for line in &section.lines {
                let (debit, credit) = match line.side {
                    crate::journal::EntrySide::Debit => (Some(line.amount), None),
                    crate::journal::EntrySide::Credit => (None, Some(line.amount)),
                };
                let description = if line.line_description.is_empty() {
                    line.entry_description.clone()
                } else {
                    line.line_description.clone()
                };
                table.push_row(vec![
                    Cell::Text(section.account_label.clone()),
                    Cell::Text(line.date.to_string()),
                    Cell::Text(description),
                    decimal_cell(debit),
                    decimal_cell(credit),
                    decimal_cell(Some(line.balance)),
                ]);
            }
        }
        table
    }
}

fn push_sections(table: &mut Table, sections: &[ReportSection]) {
    for section in sections {
        table.push_row(vec![Cell::Text(section.title.clone()), Cell::Empty]);
        for row in &section.rows {
            push_amount_row(table, &row.label, row.amount);
        }
        push_amount_row(table, &format!("Total {}", section.title), section.subtotal);
    }
}

fn push_amount_row(table: &mut Table, label: &str, amount: Decimal) {
    table.push_row(vec![
        Cell::Text(label.to_string()),
        Cell::Text(amount.to_string()),
    ]);
}

fn decimal_cell(amount: Option<Decimal>) -> Cell {
    match amount {
        Some(amount) => Cell::Text(amount.to_string()),
        None => Cell::Empty,
    }
}
