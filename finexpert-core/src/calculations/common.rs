//! Common utility functions for the calculators.
//!
//! This module provides shared functionality used across multiple
//! calculators: rounding, input guards and the compounding factors that the
//! investment formulas are built from.

use rust_decimal::{Decimal, MathematicalOps};

use crate::calculations::CalculationError;

/// Months in a year; every monthly rate is derived from an annual one.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a percentage (e.g. `7.1`) into a fraction (`0.071`).
pub fn percent_to_rate(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Converts an annual percentage into the equivalent simple monthly rate.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::common::monthly_rate;
///
/// assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
/// ```
pub fn monthly_rate(annual_percent: Decimal) -> Decimal {
    percent_to_rate(annual_percent) / Decimal::from(MONTHS_PER_YEAR)
}

/// Number of monthly periods in `years`.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if the month count does not fit.
pub fn months_in(years: u32) -> Result<u32, CalculationError> {
    years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or(CalculationError::Overflow { periods: years })
}

/// Growth factor `(1 + rate)^periods`.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if the factor cannot be represented.
pub fn compound_factor(
    rate: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(periods))
        .ok_or(CalculationError::Overflow { periods })
}

/// Future value of 1 paid at the end of each of `periods` periods:
/// `((1 + r)^n - 1) / r`.
///
/// At a zero rate the payments simply add up, so the factor is `n`.
pub fn ordinary_annuity_factor(
    rate: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    if rate.is_zero() {
        return Ok(Decimal::from(periods));
    }
    let growth = compound_factor(rate, periods)?;
    checked_div(growth - Decimal::ONE, rate, periods)
}

/// Future value of 1 paid at the start of each of `periods` periods:
/// `((1 + r)^n - 1) / r * (1 + r)`.
///
/// At a zero rate the factor is `n`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::common::annuity_due_factor;
///
/// assert_eq!(annuity_due_factor(dec!(0), 24).unwrap(), dec!(24));
/// assert_eq!(annuity_due_factor(dec!(0.1), 2).unwrap(), dec!(2.31));
/// ```
pub fn annuity_due_factor(
    rate: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    if rate.is_zero() {
        return Ok(Decimal::from(periods));
    }
    checked_mul(
        ordinary_annuity_factor(rate, periods)?,
        Decimal::ONE + rate,
        periods,
    )
}

/// `a * b`, or [`CalculationError::Overflow`] tagged with `periods`.
pub fn checked_mul(
    a: Decimal,
    b: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    a.checked_mul(b).ok_or(CalculationError::Overflow { periods })
}

/// `a + b`, or [`CalculationError::Overflow`] tagged with `periods`.
pub fn checked_add(
    a: Decimal,
    b: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::Overflow { periods })
}

/// `a - b`, or [`CalculationError::Overflow`] tagged with `periods`.
pub fn checked_sub(
    a: Decimal,
    b: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::Overflow { periods })
}

/// `a / b`, or [`CalculationError::Overflow`] tagged with `periods`.
/// Callers guard against a zero divisor.
pub fn checked_div(
    a: Decimal,
    b: Decimal,
    periods: u32,
) -> Result<Decimal, CalculationError> {
    a.checked_div(b).ok_or(CalculationError::Overflow { periods })
}

/// Rejects negative currency amounts.
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value < Decimal::ZERO {
        return Err(CalculationError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Rejects negative percentage rates.
pub fn ensure_non_negative_rate(
    field: &'static str,
    percent: Decimal,
) -> Result<Decimal, CalculationError> {
    if percent < Decimal::ZERO {
        return Err(CalculationError::NegativeRate {
            field,
            value: percent,
        });
    }
    Ok(percent)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(150.00), dec!(150.00)), dec!(150.00));
    }

    // =========================================================================
    // rate conversion tests
    // =========================================================================

    #[test]
    fn percent_to_rate_divides_by_hundred() {
        assert_eq!(percent_to_rate(dec!(7.1)), dec!(0.071));
    }

    #[test]
    fn monthly_rate_splits_annual_percent_into_twelve() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    // =========================================================================
    // compounding tests
    // =========================================================================

    #[test]
    fn months_in_multiplies_by_twelve() {
        assert_eq!(months_in(15), Ok(180));
    }

    #[test]
    fn months_in_reports_overflow() {
        assert_eq!(
            months_in(u32::MAX),
            Err(CalculationError::Overflow { periods: u32::MAX })
        );
    }

    #[test]
    fn compound_factor_is_one_for_zero_periods() {
        assert_eq!(compound_factor(dec!(0.5), 0), Ok(Decimal::ONE));
    }

    #[test]
    fn compound_factor_raises_to_power() {
        assert_eq!(compound_factor(dec!(0.1), 3), Ok(dec!(1.331)));
    }

    #[test]
    fn compound_factor_reports_overflow() {
        assert_eq!(
            compound_factor(dec!(99), 1000),
            Err(CalculationError::Overflow { periods: 1000 })
        );
    }

    #[test]
    fn checked_mul_reports_overflow() {
        assert_eq!(checked_mul(dec!(2), dec!(3), 1), Ok(dec!(6)));
        assert_eq!(
            checked_mul(Decimal::MAX, dec!(2), 7),
            Err(CalculationError::Overflow { periods: 7 })
        );
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(
            checked_add(Decimal::MAX, Decimal::ONE, 3),
            Err(CalculationError::Overflow { periods: 3 })
        );
    }

    #[test]
    fn checked_sub_reports_overflow() {
        assert_eq!(
            checked_sub(Decimal::MIN, Decimal::ONE, 1),
            Err(CalculationError::Overflow { periods: 1 })
        );
    }

    #[test]
    fn checked_div_reports_overflow() {
        assert_eq!(
            checked_div(Decimal::MAX, dec!(0.5), 2),
            Err(CalculationError::Overflow { periods: 2 })
        );
    }

    #[test]
    fn ordinary_annuity_factor_zero_rate_counts_periods() {
        assert_eq!(ordinary_annuity_factor(dec!(0), 7), Ok(dec!(7)));
    }

    #[test]
    fn ordinary_annuity_factor_two_periods() {
        // (1.21 - 1) / 0.1 = 2.1
        assert_eq!(ordinary_annuity_factor(dec!(0.1), 2), Ok(dec!(2.1)));
    }

    #[test]
    fn annuity_due_factor_adds_one_period_of_growth() {
        assert_eq!(annuity_due_factor(dec!(0.1), 2), Ok(dec!(2.31)));
    }

    // =========================================================================
    // guard tests
    // =========================================================================

    #[test]
    fn ensure_non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative("principal", dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(
            ensure_non_negative("principal", dec!(-1)),
            Err(CalculationError::NegativeAmount {
                field: "principal",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn ensure_non_negative_rate_rejects_negative() {
        assert!(matches!(
            ensure_non_negative_rate("annual return", dec!(-0.5)),
            Err(CalculationError::NegativeRate { .. })
        ));
    }
}
