//! Equated monthly installment (EMI) for an amortized loan.
//!
//! The installment is the fixed monthly payment that repays `principal`
//! together with interest over `months` payments:
//!
//! ```text
//! EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)      r = annual% / 12 / 100
//! ```
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finexpert_core::calculations::{calculate_emi, common::round_half_up};
//!
//! let emi = calculate_emi(dec!(500000), dec!(10), 12).unwrap();
//!
//! assert_eq!(round_half_up(emi), dec!(43957.94));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::CalculationError;
use crate::calculations::common::{
    checked_div, checked_mul, compound_factor, ensure_non_negative, monthly_rate,
};

/// Calculates the monthly installment that amortizes `principal` over `months`.
///
/// Degenerate inputs resolve to defined values instead of failing:
///
/// - `months == 0` returns `principal` unchanged. This is a single-period
///   placeholder, not an amortization; callers should require at least
///   one month upstream.
/// - A rate of zero or below is treated as an interest-free loan and
///   returns `principal / months`.
///
/// # Errors
///
/// Returns [`CalculationError::NegativeAmount`] for a negative principal
/// and [`CalculationError::Overflow`] if the compounding factor cannot be
/// represented or the installment itself overflows.
pub fn calculate_emi(
    principal: Decimal,
    annual_rate_percent: Decimal,
    months: u32,
) -> Result<Decimal, CalculationError> {
    ensure_non_negative("principal", principal)?;

    if months == 0 {
        debug!(%principal, "EMI requested over zero months; returning principal");
        return Ok(principal);
    }

    let periods = Decimal::from(months);
    if annual_rate_percent <= Decimal::ZERO {
        return Ok(principal / periods);
    }

    let rate = monthly_rate(annual_rate_percent);
    let growth = compound_factor(rate, months)?;
    if growth == Decimal::ONE {
        // The rate is too small to register at this precision.
        return Ok(principal / periods);
    }

    let numerator = checked_mul(checked_mul(principal, rate, months)?, growth, months)?;
    checked_div(numerator, growth - Decimal::ONE, months)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    #[test]
    fn zero_months_returns_principal() {
        assert_eq!(calculate_emi(dec!(120000), dec!(9), 0), Ok(dec!(120000)));
    }

    #[test]
    fn zero_rate_divides_principal_evenly() {
        assert_eq!(calculate_emi(dec!(120000), dec!(0), 12), Ok(dec!(10000)));
    }

    #[test]
    fn negative_rate_is_treated_as_interest_free() {
        assert_eq!(calculate_emi(dec!(1200), dec!(-3), 6), Ok(dec!(200)));
    }

    #[test]
    fn standard_loan() {
        let emi = calculate_emi(dec!(500000), dec!(10), 12).unwrap();

        // r = 0.0083333..., (1 + r)^12 = 1.1047130674...
        assert_eq!(round_half_up(emi), dec!(43957.94));
    }

    #[test]
    fn home_loan_over_twenty_years() {
        let emi = calculate_emi(dec!(2500000), dec!(8.5), 240).unwrap();

        assert_eq!(round_half_up(emi), dec!(21695.58));
    }

    #[test]
    fn installments_repay_at_least_principal_for_positive_rates() {
        let cases = [
            (dec!(100), dec!(0.0001), 3),
            (dec!(50000), dec!(1), 1),
            (dec!(500000), dec!(10), 12),
            (dec!(1000000), dec!(24), 360),
        ];

        for (principal, rate, months) in cases {
            let emi = calculate_emi(principal, rate, months).unwrap();
            assert!(
                emi * Decimal::from(months) >= principal,
                "{principal} at {rate}% over {months} months gave EMI {emi}"
            );
        }
    }

    #[test]
    fn single_month_repays_principal_plus_one_month_interest() {
        // 12% a year is 1% for the month.
        assert_eq!(calculate_emi(dec!(1000), dec!(12), 1), Ok(dec!(1010)));
    }

    #[test]
    fn huge_principal_reports_overflow() {
        // 100% a month doubles the debt every month: 2^12 = 4096.
        assert_eq!(
            calculate_emi(Decimal::MAX / dec!(10), dec!(1200), 12),
            Err(CalculationError::Overflow { periods: 12 })
        );
    }

    #[test]
    fn negative_principal_is_rejected() {
        assert_eq!(
            calculate_emi(dec!(-1), dec!(10), 12),
            Err(CalculationError::NegativeAmount {
                field: "principal",
                value: dec!(-1),
            })
        );
    }
}
