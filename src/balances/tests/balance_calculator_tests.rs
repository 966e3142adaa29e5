// Tests for the balance calculator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::accounts::{Account, AccountCategory, AccountType};
use crate::balances::{account_balance, balances_for, category_total, running_balance};
use crate::journal::{EntryKind, EntrySide, JournalEntry, LineItem};

// Helper to create NaiveDate from string for tests
fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// Helper to create accounts easily
fn account(id: &str, code: &str, name: &str, account_type: AccountType) -> Account {
    Account {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        description: String::new(),
    }
}

// Helper to create line items easily
fn line(account: &Account, side: EntrySide, amount: Decimal) -> LineItem {
    LineItem {
        account_id: account.id.clone(),
        account_name: account.display_label(),
        account_type: account.account_type,
        description: String::new(),
        side,
        amount,
    }
}

fn entry(id: &str, date_str: &str, line_items: Vec<LineItem>) -> JournalEntry {
    JournalEntry {
        id: id.to_string(),
        date: date(date_str),
        description: String::new(),
        kind: EntryKind::Standard,
        line_items,
        reconciled: false,
    }
}

#[test]
fn crediting_a_revenue_account_reads_positive() {
    let bank = account("bank", "1100", "Checking", AccountType::BankAccount);
    let revenue = account("rev", "4000", "Consulting", AccountType::Revenue);

    let entries = vec![entry(
        "e1",
        "2024-02-01",
        vec![
            line(&bank, EntrySide::Debit, dec!(100.00)),
            line(&revenue, EntrySide::Credit, dec!(100.00)),
        ],
    )];

    assert_eq!(account_balance(&revenue, &entries), dec!(100.00));
    assert_eq!(account_balance(&bank, &entries), dec!(100.00));
}

#[test]
fn debit_normal_accounts_decrease_on_credits() {
    let cash = account("cash", "1000", "Cash", AccountType::CurrentAsset);
    let expense = account("exp", "6000", "Rent", AccountType::Expense);
    let equity = account("eq", "3000", "Capital", AccountType::Equity);

    let entries = vec![
        entry(
            "e1",
            "2024-01-10",
            vec![
                line(&cash, EntrySide::Debit, dec!(500.00)),
                line(&equity, EntrySide::Credit, dec!(500.00)),
            ],
        ),
        entry(
            "e2",
            "2024-01-20",
            vec![
                line(&expense, EntrySide::Debit, dec!(100.00)),
                line(&cash, EntrySide::Credit, dec!(100.00)),
            ],
        ),
    ];

    assert_eq!(account_balance(&cash, &entries), dec!(400.00));
    assert_eq!(account_balance(&expense, &entries), dec!(100.00));
    assert_eq!(account_balance(&equity, &entries), dec!(500.00));
}

#[test]
fn account_balance_is_pure() {
    let cash = account("cash", "1000", "Cash", AccountType::CurrentAsset);
    let equity = account("eq", "3000", "Capital", AccountType::Equity);
    let entries = vec![entry(
        "e1",
        "2024-01-10",
        vec![
            line(&cash, EntrySide::Debit, dec!(250.00)),
            line(&equity, EntrySide::Credit, dec!(250.00)),
        ],
    )];

    let first = account_balance(&cash, &entries);
    let second = account_balance(&cash, &entries);
    assert_eq!(first, second);
}

#[test]
fn balances_for_skips_lines_on_unknown_accounts() {
    let cash = account("cash", "1000", "Cash", AccountType::CurrentAsset);
    let ghost = account("ghost", "9999", "Deleted", AccountType::CurrentAsset);
    let entries = vec![entry(
        "e1",
        "2024-01-10",
        vec![
            line(&cash, EntrySide::Debit, dec!(50.00)),
            line(&ghost, EntrySide::Credit, dec!(50.00)),
        ],
    )];

    let balances = balances_for(&[cash.clone()], &entries);
    assert_eq!(balances.get("cash"), Some(&dec!(50.00)));
    assert_eq!(balances.get("ghost"), None);
}

#[test]
fn running_balance_is_raw_debit_minus_credit_even_for_credit_normal_accounts() {
    let revenue = account("rev", "4000", "Consulting", AccountType::Revenue);
    let bank = account("bank", "1100", "Checking", AccountType::BankAccount);

    // Out-of-order input; the calculator sorts chronologically.
    let entries = vec![
        entry(
            "e2",
            "2024-02-01",
            vec![
                line(&bank, EntrySide::Debit, dec!(40.00)),
                line(&revenue, EntrySide::Credit, dec!(40.00)),
            ],
        ),
        entry(
            "e1",
            "2024-01-01",
            vec![
                line(&bank, EntrySide::Debit, dec!(100.00)),
                line(&revenue, EntrySide::Credit, dec!(100.00)),
            ],
        ),
    ];

    let lines = running_balance("rev", &entries);
    assert_eq!(lines.len(), 2);
    // A credit-normal account still reads negative in the ledger view.
    assert_eq!(lines[0].date, date("2024-01-01"));
    assert_eq!(lines[0].balance, dec!(-100.00));
    assert_eq!(lines[1].balance, dec!(-140.00));
}

#[test]
fn same_date_ties_keep_stored_order() {
    let cash = account("cash", "1000", "Cash", AccountType::CurrentAsset);
    let equity = account("eq", "3000", "Capital", AccountType::Equity);

    // Ids deliberately sort against the stored order.
    let entries = vec![
        entry(
            "b",
            "2024-01-01",
            vec![
                line(&cash, EntrySide::Debit, dec!(2.00)),
                line(&equity, EntrySide::Credit, dec!(2.00)),
            ],
        ),
        entry(
            "a",
            "2024-01-01",
            vec![
                line(&cash, EntrySide::Debit, dec!(1.00)),
                line(&equity, EntrySide::Credit, dec!(1.00)),
            ],
        ),
    ];

    let lines = running_balance("cash", &entries);
    assert_eq!(lines[0].entry_id, "b");
    assert_eq!(lines[0].balance, dec!(2.00));
    assert_eq!(lines[1].entry_id, "a");
    assert_eq!(lines[1].balance, dec!(3.00));
}

#[test]
fn category_totals_group_by_account_category() {
    let cash = account("cash", "1000", "Cash", AccountType::CurrentAsset);
    let bank = account("bank", "1100", "Checking", AccountType::BankAccount);
    let loan = account("loan", "2000", "Loan", AccountType::CurrentLiability);
    let accounts = vec![cash.clone(), bank.clone(), loan.clone()];

    let entries = vec![entry(
        "e1",
        "2024-01-10",
        vec![
            line(&cash, EntrySide::Debit, dec!(300.00)),
            line(&bank, EntrySide::Debit, dec!(200.00)),
            line(&loan, EntrySide::Credit, dec!(500.00)),
        ],
    )];

    let balances = balances_for(&accounts, &entries);
    assert_eq!(
        category_total(&accounts, &balances, AccountCategory::Asset),
        dec!(500.00)
    );
    assert_eq!(
        category_total(&accounts, &balances, AccountCategory::Liability),
        dec!(500.00)
    );
}
