use rust_decimal::Decimal;

/// Code suffix appended to an Investment account's code for its MTM pair
pub const MTM_CODE_SUFFIX: &str = "1";

/// Name suffix appended to an Investment account's name for its MTM pair
pub const MTM_NAME_SUFFIX: &str = " - MTM";

/// Well-known Unrealized Gain/Loss revenue account
pub const UNREALIZED_GAIN_LOSS_CODE: &str = "UGL";
pub const UNREALIZED_GAIN_LOSS_NAME: &str = "Unrealized Gain/Loss";

/// Well-known Realized Gain/Loss revenue account
pub const REALIZED_GAIN_LOSS_CODE: &str = "RGL";
pub const REALIZED_GAIN_LOSS_NAME: &str = "Realized Gain/Loss";

/// Decimal precision for monetary amounts
pub const AMOUNT_DECIMAL_PRECISION: u32 = 2;

/// Tolerance for report-level equality checks (balance sheet self-check,
/// reconciliation splits). Posting-time balance validation is exact.
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}
