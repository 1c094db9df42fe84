//! Display helpers shared by every front end.
//!
//! Reports are computed in `f64`; rounding to cents happens only when a
//! value is shown, using [`Decimal`] so the midpoint rule is exact.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::numeric::Numeric;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ifta_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a computed amount to a two-decimal [`Decimal`].
///
/// Returns `None` when the value is outside the range `Decimal` can hold.
pub fn to_cents(value: f64) -> Option<Decimal> {
    let mut rounded = round_half_up(Decimal::from_f64(value)?);
    rounded.rescale(2);
    Some(rounded)
}

/// Formats an amount with exactly two decimal places, e.g. `"10.00"`.
///
/// Non-finite values print as `"0.00"`. Finite values beyond the range of
/// [`Decimal`] fall back to `f64` formatting.
///
/// # Examples
///
/// ```
/// use ifta_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(10.0), "10.00");
/// assert_eq!(format_amount(-2.0), "-2.00");
/// assert_eq!(format_amount(1.0 / 3.0), "0.33");
/// ```
pub fn format_amount(value: f64) -> String {
    let value = value.to_numeric();
    match to_cents(value) {
        Some(cents) if cents.is_zero() => "0.00".to_string(),
        Some(cents) => cents.to_string(),
        None => format!("{value:.2}"),
    }
}

/// Formats a raw total the way it is entered: no forced precision.
///
/// Whole numbers print without a fractional part (`200`), everything else
/// prints in its shortest exact form (`12.5`).
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        // Avoids printing "-0".
        return "0".to_string();
    }
    format!("{value}")
}
