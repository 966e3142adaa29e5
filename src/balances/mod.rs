pub(crate) mod balance_calculator;

// Re-export the public interface
pub use balance_calculator::{
    account_balance, balances_for, category_total, running_balance, LedgerLine,
};

#[cfg(test)]
pub(crate) mod tests;
