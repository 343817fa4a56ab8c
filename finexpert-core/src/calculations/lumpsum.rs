//! One-time (lumpsum) investment growth with a year-by-year breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{
    checked_mul, compound_factor, ensure_non_negative, ensure_non_negative_rate, percent_to_rate,
};

/// Value of the investment at the end of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpsumYear {
    /// 1-based year number.
    pub year: u32,
    /// Cumulative value at the end of the year.
    pub value: Decimal,
    /// Gain over the original principal, not over the previous year.
    pub returns: Decimal,
}

/// Result of [`calculate_lumpsum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpsumResult {
    pub future_value: Decimal,
    pub total_returns: Decimal,
    pub yearly_breakdown: Vec<LumpsumYear>,
}

/// Grows `principal` at `annual_return_percent`, compounded yearly.
///
/// A zero-year horizon returns the principal itself with an empty
/// breakdown.
///
/// # Errors
///
/// Returns [`CalculationError`] for a negative principal or rate, or if the
/// future value overflows.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::calculate_lumpsum;
///
/// let result = calculate_lumpsum(dec!(100000), dec!(10), 2).unwrap();
///
/// assert_eq!(result.future_value, dec!(121000));
/// assert_eq!(result.yearly_breakdown[0].returns, dec!(10000));
/// assert_eq!(result.yearly_breakdown[1].returns, dec!(21000));
/// ```
pub fn calculate_lumpsum(
    principal: Decimal,
    annual_return_percent: Decimal,
    years: u32,
) -> Result<LumpsumResult, CalculationError> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative_rate("annual return", annual_return_percent)?;

    let rate = percent_to_rate(annual_return_percent);
    let future_value = checked_mul(principal, compound_factor(rate, years)?, years)?;

    let growth = Decimal::ONE + rate;
    let mut value = principal;
    let mut yearly_breakdown = Vec::new();
    for year in 1..=years {
        value = checked_mul(value, growth, year)?;
        yearly_breakdown.push(LumpsumYear {
            year,
            value,
            returns: value - principal,
        });
    }

    Ok(LumpsumResult {
        future_value,
        total_returns: future_value - principal,
        yearly_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    #[test]
    fn zero_years_is_identity() {
        let result = calculate_lumpsum(dec!(100000), dec!(12), 0).unwrap();

        assert_eq!(result.future_value, dec!(100000));
        assert_eq!(result.total_returns, dec!(0));
        assert!(result.yearly_breakdown.is_empty());
    }

    #[test]
    fn five_years_at_twelve_percent() {
        let result = calculate_lumpsum(dec!(100000), dec!(12), 5).unwrap();

        // 100000 * 1.12^5
        assert_eq!(result.future_value, dec!(176234.16832));
        assert_eq!(round_half_up(result.total_returns), dec!(76234.17));
        assert_eq!(result.yearly_breakdown.len(), 5);
    }

    #[test]
    fn breakdown_returns_are_measured_against_principal() {
        let result = calculate_lumpsum(dec!(1000), dec!(10), 3).unwrap();

        assert_eq!(
            result.yearly_breakdown,
            vec![
                LumpsumYear {
                    year: 1,
                    value: dec!(1100),
                    returns: dec!(100),
                },
                LumpsumYear {
                    year: 2,
                    value: dec!(1210),
                    returns: dec!(210),
                },
                LumpsumYear {
                    year: 3,
                    value: dec!(1331),
                    returns: dec!(331),
                },
            ]
        );
    }

    #[test]
    fn last_breakdown_year_matches_future_value() {
        let result = calculate_lumpsum(dec!(250000), dec!(8), 7).unwrap();

        let last = result.yearly_breakdown.last().unwrap();
        assert_eq!(round_half_up(last.value), round_half_up(result.future_value));
    }

    #[test]
    fn doubling_for_ninety_years_reports_overflow() {
        // 2^90 still fits; 1000 * 2^90 does not.
        assert_eq!(
            calculate_lumpsum(dec!(1000), dec!(100), 90),
            Err(CalculationError::Overflow { periods: 90 })
        );
    }

    #[test]
    fn zero_rate_keeps_principal_flat() {
        let result = calculate_lumpsum(dec!(5000), dec!(0), 4).unwrap();

        assert_eq!(result.future_value, dec!(5000));
        assert!(result.yearly_breakdown.iter().all(|y| y.returns.is_zero()));
    }
}
