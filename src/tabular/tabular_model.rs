use chrono::{Duration, NaiveDate};
use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::tabular_errors::{Result, TabularError};
use crate::constants::AMOUNT_DECIMAL_PRECISION;

/// One spreadsheet cell as delivered by the tabular collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// A plain table of rows, the only "wire format" this crate speaks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Index of a header, matched case-insensitively.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(header))
    }
}

/// One decoded bank-statement row
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

/// Decodes the bank-statement rows of an imported table.
///
/// The table must carry `date`, `amount` and `description` columns
/// (case-insensitive). Rows whose date or amount cannot be decoded are
/// skipped with a warning; they never fail the batch.
pub fn statement_rows(table: &Table) -> Result<Vec<StatementRow>> {
    let date_col = table
        .column_index("date")
        .ok_or_else(|| TabularError::MissingColumn("date".to_string()))?;
    let amount_col = table
        .column_index("amount")
        .ok_or_else(|| TabularError::MissingColumn("amount".to_string()))?;
    let description_col = table
        .column_index("description")
        .ok_or_else(|| TabularError::MissingColumn("description".to_string()))?;

    let mut rows = Vec::new();
    for (row_number, row) in table.rows.iter().enumerate() {
        let date = row.get(date_col).and_then(decode_external_date);
        let amount = row.get(amount_col).and_then(decode_amount);
        let (Some(date), Some(amount)) = (date, amount) else {
            warn!("Skipping statement row {}: bad date or amount", row_number + 1);
            continue;
        };
        let description = match row.get(description_col) {
            Some(Cell::Text(text)) => text.trim().to_string(),
            Some(Cell::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        rows.push(StatementRow {
            date,
            amount,
            description,
        });
    }
    Ok(rows)
}

/// Decodes an external date cell.
///
/// Numbers are spreadsheet day serials against the 1899-12-30 epoch;
/// strings must be `MM/DD/YYYY`.
pub fn decode_external_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Number(serial) => {
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            if !serial.is_finite() || *serial < 0.0 {
                return None;
            }
            let days = Duration::try_days(serial.trunc() as i64)?;
            epoch.checked_add_signed(days)
        }
        Cell::Text(text) => NaiveDate::parse_from_str(text.trim(), "%m/%d/%Y").ok(),
        Cell::Empty => None,
    }
}

/// Decodes a signed amount cell, rounded to cents. String cells may carry
/// currency formatting ("$1,234.56").
pub fn decode_amount(cell: &Cell) -> Option<Decimal> {
    let amount = match cell {
        Cell::Number(n) => Decimal::from_f64(*n)?,
        Cell::Text(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| !matches!(c, '$' | ','))
                .collect();
            cleaned.parse::<Decimal>().ok()?
        }
        Cell::Empty => return None,
    };
    Some(amount.round_dp(AMOUNT_DECIMAL_PRECISION))
}

/// The fixed bank-import template: header row plus three example rows.
pub fn bank_import_template() -> Table {
    let mut table = Table::new("Bank Import Template", &["Date", "Amount", "Description"]);
    table.push_row(vec![
        Cell::Text("01/15/2024".to_string()),
        Cell::Number(1500.00),
        Cell::Text("Customer payment".to_string()),
    ]);
    table.push_row(vec![
        Cell::Text("01/18/2024".to_string()),
        Cell::Number(-42.50),
        Cell::Text("Bank fees".to_string()),
    ]);
    table.push_row(vec![
        Cell::Text("01/31/2024".to_string()),
        Cell::Number(-1200.00),
        Cell::Text("Office rent".to_string()),
    ]);
    table
}
