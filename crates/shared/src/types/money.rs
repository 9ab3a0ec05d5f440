//! Amount display.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end.

use rust_decimal::Decimal;

/// Formats an amount as `<amount> <unit>`.
///
/// Trailing zeros are dropped so whole amounts print as integers
/// (`50000.00` becomes `50000`). No thousands separator is inserted and the
/// unit is appended verbatim.
#[must_use]
pub fn format_amount(amount: Decimal, unit: &str) -> String {
    format!("{} {unit}", amount.normalize())
}
