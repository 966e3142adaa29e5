use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountCategory};
use crate::journal::{EntrySide, JournalEntry};

/// One ledger line with the cumulative balance after it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
    pub entry_id: String,
    pub date: NaiveDate,
    pub entry_description: String,
    pub line_description: String,
    pub side: EntrySide,
    pub amount: Decimal,
    pub balance: Decimal,
}

/// Signed balance of one account over a set of entries.
///
/// Uses the account's normal side: a debit-normal account gains on debits
/// and loses on credits, a credit-normal account the reverse. Pure function
/// of its inputs.
pub fn account_balance(account: &Account, entries: &[JournalEntry]) -> Decimal {
    entries
        .iter()
        .flat_map(|entry| entry.line_items.iter())
        .filter(|line| line.account_id == account.id)
        .map(|line| {
            if line.side == account.account_type.normal_side() {
                line.amount
            } else {
                -line.amount
            }
        })
        .sum()
}

/// Signed balances for every account, keyed by account id.
///
/// Lines referencing an account missing from the chart are skipped, as the
/// legacy ledger did.
pub fn balances_for(
    accounts: &[Account],
    entries: &[JournalEntry],
) -> HashMap<String, Decimal> {
    let by_id: HashMap<&str, &Account> = accounts
        .iter()
        .map(|account| (account.id.as_str(), account))
        .collect();

    let mut balances: HashMap<String, Decimal> = HashMap::new();
    for entry in entries {
        for line in &entry.line_items {
            let Some(account) = by_id.get(line.account_id.as_str()) else {
                debug!(
                    "Skipping line on unknown account {} in entry {}",
                    line.account_id, entry.id
                );
                continue;
            };
            let signed = if line.side == account.account_type.normal_side() {
                line.amount
            } else {
                -line.amount
            };
            *balances.entry(line.account_id.clone()).or_default() += signed;
        }
    }
    balances
}

/// Chronological ledger lines for one account with a running balance.
///
/// The running balance is cumulative raw debit(+)/credit(-) regardless of
/// the account's normal side; the ledger view reads that way for every
/// account type, which intentionally differs from [`account_balance`].
/// Same-date entries keep their stored order.
pub fn running_balance(account_id: &str, entries: &[JournalEntry]) -> Vec<LedgerLine> {
    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    // Stable sort: ties keep the caller's order.
    ordered.sort_by_key(|entry| entry.date);

    let mut balance = Decimal::ZERO;
    let mut lines = Vec::new();
    for entry in ordered {
        for line in entry.line_items.iter().filter(|l| l.account_id == account_id) {
            balance += match line.side {
                EntrySide::Debit => line.amount,
                EntrySide::Credit => -line.amount,
            };
            lines.push(LedgerLine {
                entry_id: entry.id.clone(),
                date: entry.date,
                entry_description: entry.description.clone(),
                line_description: line.description.clone(),
                side: line.side,
                amount: line.amount,
                balance,
            });
        }
    }
    lines
}

/// Sum of the balances of all accounts in one category.
pub fn category_total(
    accounts: &[Account],
    balances: &HashMap<String, Decimal>,
    category: AccountCategory,
) -> Decimal {
    accounts
        .iter()
        .filter(|account| account.account_type.category() == category)
        .map(|account| balances.get(&account.id).copied().unwrap_or_default())
        .sum()
}
