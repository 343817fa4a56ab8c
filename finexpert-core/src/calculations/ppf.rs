//! Public Provident Fund (PPF) accrual.
//!
//! PPF takes one deposit per year and credits interest once a year. The
//! interest for a year is earned on the opening balance **plus** that
//! year's deposit:
//!
//! | Step | Value |
//! |------|-------|
//! | interest | `(balance + deposit) * rate`, credited to the paisa |
//! | balance  | `balance + deposit + interest` |
//!
//! Crediting each year's interest in whole paise keeps the ledger exact:
//! the maturity value is always the sum of deposits and credited interest.
//! It stays within a few paise of the unrounded closed form
//! `deposit * ((1 + r)^n - 1) / r * (1 + r)`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finexpert_core::calculations::calculate_ppf;
//!
//! let result = calculate_ppf(dec!(150000), dec!(7.1), 15).unwrap();
//!
//! assert_eq!(result.total_investment, dec!(2250000));
//! assert_eq!(result.maturity_value, dec!(4068209.23));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{
    checked_add, checked_mul, ensure_non_negative_rate, percent_to_rate, round_half_up,
};

/// Smallest deposit accepted in a year.
pub const PPF_MIN_CONTRIBUTION: Decimal = dec!(500);

/// Largest deposit accepted in a year.
pub const PPF_MAX_CONTRIBUTION: Decimal = dec!(150000);

/// Account activity for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpfYear {
    pub year: u32,
    pub investment: Decimal,
    pub interest: Decimal,
    /// Closing balance.
    pub balance: Decimal,
}

/// Result of [`calculate_ppf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpfResult {
    pub total_investment: Decimal,
    pub total_interest: Decimal,
    /// Closing balance of the final year; always
    /// `total_investment + total_interest`.
    pub maturity_value: Decimal,
    pub yearly_data: Vec<PpfYear>,
}

/// Projects a PPF account with a fixed yearly deposit.
///
/// # Errors
///
/// Returns [`CalculationError::PpfContributionOutOfRange`] when the deposit
/// is outside [`PPF_MIN_CONTRIBUTION`]..=[`PPF_MAX_CONTRIBUTION`] and
/// [`CalculationError::NegativeRate`] for a negative rate, and
/// [`CalculationError::Overflow`] if the balance outgrows a `Decimal`.
pub fn calculate_ppf(
    yearly_investment: Decimal,
    interest_rate_percent: Decimal,
    years: u32,
) -> Result<PpfResult, CalculationError> {
    if !(PPF_MIN_CONTRIBUTION..=PPF_MAX_CONTRIBUTION).contains(&yearly_investment) {
        return Err(CalculationError::PpfContributionOutOfRange {
            value: yearly_investment,
            min: PPF_MIN_CONTRIBUTION,
            max: PPF_MAX_CONTRIBUTION,
        });
    }
    ensure_non_negative_rate("interest rate", interest_rate_percent)?;

    let rate = percent_to_rate(interest_rate_percent);
    let mut balance = Decimal::ZERO;
    let mut total_investment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut yearly_data = Vec::new();

    for year in 1..=years {
        // Interest accrues on the deposit too, so compute it before either
        // is added to the balance.
        let opening = checked_add(balance, yearly_investment, year)?;
        let interest = round_half_up(checked_mul(opening, rate, year)?);
        balance = checked_add(opening, interest, year)?;
        total_investment = checked_add(total_investment, yearly_investment, year)?;
        total_interest = checked_add(total_interest, interest, year)?;

        yearly_data.push(PpfYear {
            year,
            investment: yearly_investment,
            interest,
            balance,
        });
    }

    Ok(PpfResult {
        total_investment,
        total_interest,
        maturity_value: balance,
        yearly_data,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::common::annuity_due_factor;

    #[test]
    fn maximum_deposit_for_fifteen_years() {
        let result = calculate_ppf(dec!(150000), dec!(7.1), 15).unwrap();

        assert_eq!(result.total_investment, dec!(2250000));
        assert_eq!(result.total_interest, dec!(1818209.23));
        assert_eq!(result.maturity_value, dec!(4068209.23));
        assert_eq!(result.yearly_data.len(), 15);
    }

    #[test]
    fn first_years_earn_interest_on_the_fresh_deposit() {
        let result = calculate_ppf(dec!(150000), dec!(7.1), 3).unwrap();

        assert_eq!(
            result.yearly_data,
            vec![
                PpfYear {
                    year: 1,
                    investment: dec!(150000),
                    interest: dec!(10650.00),
                    balance: dec!(160650.00),
                },
                PpfYear {
                    year: 2,
                    investment: dec!(150000),
                    interest: dec!(22056.15),
                    balance: dec!(332706.15),
                },
                PpfYear {
                    year: 3,
                    investment: dec!(150000),
                    interest: dec!(34272.14),
                    balance: dec!(516978.29),
                },
            ]
        );
    }

    #[test]
    fn maturity_equals_investment_plus_interest() {
        let cases = [
            (dec!(500), dec!(7.1), 15),
            (dec!(12345.67), dec!(8.25), 20),
            (dec!(150000), dec!(0), 5),
            (dec!(99999), dec!(12.5), 50),
        ];

        for (deposit, rate, years) in cases {
            let result = calculate_ppf(deposit, rate, years).unwrap();
            assert_eq!(
                result.maturity_value,
                result.total_investment + result.total_interest,
                "{deposit} at {rate}% for {years} years"
            );
        }
    }

    #[test]
    fn paise_rounding_stays_within_half_a_paisa_a_year_of_closed_form() {
        let cases = [
            (dec!(150000), dec!(7.1), 15u32),
            (dec!(500), dec!(7.1), 15),
            (dec!(12345.67), dec!(8.25), 20),
        ];

        for (deposit, rate_percent, years) in cases {
            let result = calculate_ppf(deposit, rate_percent, years).unwrap();
            let rate = percent_to_rate(rate_percent);
            let closed_form = deposit * annuity_due_factor(rate, years).unwrap();

            let drift = (result.maturity_value - closed_form).abs();
            assert!(
                drift <= dec!(0.005) * Decimal::from(years),
                "{deposit} at {rate_percent}% for {years} years drifted {drift}"
            );
        }
    }

    #[test]
    fn fifteen_year_maturity_is_within_a_paisa_of_closed_form() {
        let result = calculate_ppf(dec!(150000), dec!(7.1), 15).unwrap();

        // Unrounded: 4068209.2202879...
        let closed_form = dec!(150000) * annuity_due_factor(dec!(0.071), 15).unwrap();
        assert_eq!(round_half_up(closed_form), dec!(4068209.22));
        assert_eq!(result.maturity_value, dec!(4068209.23));
    }

    #[test]
    fn runaway_rate_reports_overflow() {
        // The balance grows elevenfold every year.
        assert!(matches!(
            calculate_ppf(dec!(150000), dec!(1000), 30),
            Err(CalculationError::Overflow { .. })
        ));
    }

    #[test]
    fn zero_years_is_empty() {
        let result = calculate_ppf(dec!(1000), dec!(7.1), 0).unwrap();

        assert_eq!(result.maturity_value, dec!(0));
        assert!(result.yearly_data.is_empty());
    }

    #[test]
    fn deposit_below_minimum_is_rejected() {
        assert_eq!(
            calculate_ppf(dec!(499.99), dec!(7.1), 15),
            Err(CalculationError::PpfContributionOutOfRange {
                value: dec!(499.99),
                min: PPF_MIN_CONTRIBUTION,
                max: PPF_MAX_CONTRIBUTION,
            })
        );
    }

    #[test]
    fn deposit_above_maximum_is_rejected() {
        assert!(calculate_ppf(dec!(150000.01), dec!(7.1), 15).is_err());
    }

    #[test]
    fn boundary_deposits_are_accepted() {
        assert!(calculate_ppf(PPF_MIN_CONTRIBUTION, dec!(7.1), 1).is_ok());
        assert!(calculate_ppf(PPF_MAX_CONTRIBUTION, dec!(7.1), 1).is_ok());
    }
}
