//! Simple (non-compounding) interest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{
    checked_add, checked_mul, ensure_non_negative, ensure_non_negative_rate, percent_to_rate,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub interest: Decimal,
    /// `principal + interest`.
    pub total_amount: Decimal,
}

/// Interest on `principal` at `rate_percent` a year for `years`, which may
/// be fractional.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::calculate_simple_interest;
///
/// let result = calculate_simple_interest(dec!(10000), dec!(5), dec!(2.5)).unwrap();
/// assert_eq!(result.interest, dec!(1250));
/// assert_eq!(result.total_amount, dec!(11250));
/// ```
pub fn calculate_simple_interest(
    principal: Decimal,
    rate_percent: Decimal,
    years: Decimal,
) -> Result<SimpleInterestResult, CalculationError> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative_rate("interest rate", rate_percent)?;
    ensure_non_negative("years", years)?;

    let interest = checked_mul(
        checked_mul(principal, percent_to_rate(rate_percent), 1)?,
        years,
        1,
    )?;
    Ok(SimpleInterestResult {
        interest,
        total_amount: checked_add(principal, interest, 1)?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn whole_years() {
        let result = calculate_simple_interest(dec!(50000), dec!(8), dec!(3)).unwrap();

        assert_eq!(result.interest, dec!(12000));
        assert_eq!(result.total_amount, dec!(62000));
    }

    #[test]
    fn zero_rate_earns_nothing() {
        let result = calculate_simple_interest(dec!(50000), dec!(0), dec!(3)).unwrap();

        assert_eq!(result.interest, dec!(0));
        assert_eq!(result.total_amount, dec!(50000));
    }

    #[test]
    fn oversized_interest_reports_overflow() {
        assert_eq!(
            calculate_simple_interest(Decimal::MAX, dec!(100), dec!(2)),
            Err(CalculationError::Overflow { periods: 1 })
        );
    }

    #[test]
    fn negative_years_are_rejected() {
        assert_eq!(
            calculate_simple_interest(dec!(100), dec!(5), dec!(-1)),
            Err(CalculationError::NegativeAmount {
                field: "years",
                value: dec!(-1),
            })
        );
    }
}
