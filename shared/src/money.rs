//! Minor-unit money helpers
//!
//! Charges are stored as integer paise (hundredths of a rupee) so that
//! totals never pick up floating-point drift. These helpers convert
//! between the stored value and what a person reads or types.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Printed in place of a charge that is absent or zero ("rate not yet entered")
pub const PLACEHOLDER: &str = "____";

/// Currency marker prefixed to printed amounts
pub const CURRENCY: &str = "Rs.";

/// Convert a stored minor-unit value to a display decimal
///
/// `None` and `0` carry no meaning as a charge: they become `"-"` when
/// `show_dash_for_null` is set and an empty string otherwise.
///
/// ```
/// use shared::money::from_db_value;
///
/// assert_eq!(from_db_value(Some(12550), true), "125.50");
/// assert_eq!(from_db_value(Some(0), true), "-");
/// assert_eq!(from_db_value(None, false), "");
/// ```
pub fn from_db_value(value: Option<i64>, show_dash_for_null: bool) -> String {
    match value {
        None | Some(0) => {
            if show_dash_for_null {
                "-".to_string()
            } else {
                String::new()
            }
        }
        Some(minor) => Decimal::new(minor, 2).to_string(),
    }
}

/// Convert a typed decimal string to minor units
///
/// Rounds half away from zero at the paisa. Blank, unparseable, negative
/// or out-of-range input yields `None`.
///
/// ```
/// use shared::money::to_db_value;
///
/// assert_eq!(to_db_value("125.5"), Some(12550));
/// assert_eq!(to_db_value(""), None);
/// ```
pub fn to_db_value(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = match Decimal::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(input = trimmed, error = %e, "Ignoring unparseable amount");
            return None;
        }
    };
    if value.is_sign_negative() && !value.is_zero() {
        tracing::debug!(input = trimmed, "Ignoring negative amount");
        return None;
    }
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Printable charge: `"Rs.125.50"`, or the placeholder for zero
pub fn format_charge(minor: i64) -> String {
    if minor == 0 {
        PLACEHOLDER.to_string()
    } else {
        format!("{}{}", CURRENCY, from_db_value(Some(minor), false))
    }
}

/// Printable optional charge; absent renders as the placeholder
pub fn format_optional_charge(minor: Option<i64>) -> String {
    format_charge(minor.unwrap_or(0))
}
