//! Common arithmetic used by the income tax calculator.
//!
//! No rounding is performed here; every helper is exact on [`Decimal`].

use rust_decimal::Decimal;

/// Caps an allowance amount at its ceiling.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::cap;
///
/// assert_eq!(cap(dec!(150000), dec!(100000)), dec!(100000));
/// assert_eq!(cap(dec!(20000), dec!(100000)), dec!(20000));
/// ```
pub fn cap(
    amount: Decimal,
    ceiling: Decimal,
) -> Decimal {
    amount.min(ceiling)
}

/// Returns the part of `income` that falls inside `(min, max]`.
///
/// A `max` of `None` means the span is unbounded above. Income at or below
/// `min` yields zero, so negative income never produces a portion.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::bracket_portion;
///
/// assert_eq!(bracket_portion(dec!(340000), dec!(150000), Some(dec!(500000))), dec!(190000));
/// assert_eq!(bracket_portion(dec!(600000), dec!(150000), Some(dec!(500000))), dec!(350000));
/// assert_eq!(bracket_portion(dec!(100000), dec!(150000), Some(dec!(500000))), dec!(0));
/// ```
pub fn bracket_portion(
    income: Decimal,
    min: Decimal,
    max: Option<Decimal>,
) -> Decimal {
    if income <= min {
        return Decimal::ZERO;
    }
    match max {
        Some(max) if income > max => max - min,
        _ => income - min,
    }
}
