//! Systematic investment plan (SIP) future value.
//!
//! A SIP invests a fixed amount at the start of every month. With
//! `r = annual% / 100 / 12` and `n = years * 12` the corpus is the future
//! value of an annuity due:
//!
//! ```text
//! FV = P * ((1 + r)^n - 1) / r * (1 + r)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{
    annuity_due_factor, checked_mul, ensure_non_negative, ensure_non_negative_rate, monthly_rate,
    months_in,
};

/// Result of [`calculate_sip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipResult {
    /// Corpus at the end of the horizon.
    pub future_value: Decimal,
    /// Sum of all monthly contributions.
    pub total_invested: Decimal,
    /// `future_value - total_invested`.
    pub estimated_returns: Decimal,
}

/// Projects a monthly SIP over `years`.
///
/// At a 0% return the corpus is the plain sum of contributions.
///
/// # Errors
///
/// Returns [`CalculationError`] for a negative amount or rate, or if the
/// corpus overflows.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::calculate_sip;
///
/// let result = calculate_sip(dec!(5000), dec!(12), 10).unwrap();
///
/// assert_eq!(result.total_invested, dec!(600000));
/// assert_eq!(result.future_value.round(), dec!(1161695));
/// ```
pub fn calculate_sip(
    monthly_amount: Decimal,
    annual_return_percent: Decimal,
    years: u32,
) -> Result<SipResult, CalculationError> {
    ensure_non_negative("monthly amount", monthly_amount)?;
    ensure_non_negative_rate("annual return", annual_return_percent)?;

    let months = months_in(years)?;
    let rate = monthly_rate(annual_return_percent);

    let future_value = checked_mul(monthly_amount, annuity_due_factor(rate, months)?, months)?;
    let total_invested = checked_mul(monthly_amount, Decimal::from(months), months)?;

    Ok(SipResult {
        future_value,
        total_invested,
        estimated_returns: future_value - total_invested,
    })
}
