//! Retirement corpus and the monthly SIP needed to reach it.
//!
//! The corpus follows the 4% safe-withdrawal rule: today's monthly expenses
//! are inflated to the retirement date and the resulting annual spend is
//! multiplied by [`CORPUS_MULTIPLIER`]. Existing savings are grown at the
//! expected return until retirement; whatever they leave uncovered is funded
//! by a SIP with the same annuity-due structure as
//! [`calculate_sip`](crate::calculations::calculate_sip).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalculationError;
use crate::calculations::common::{
    MONTHS_PER_YEAR, annuity_due_factor, checked_div, checked_mul, compound_factor,
    ensure_non_negative, ensure_non_negative_rate, max, monthly_rate, months_in, percent_to_rate,
};

/// Planning horizon: the age the corpus must last until.
pub const LIFE_EXPECTANCY_AGE: u32 = 90;

/// Corpus as a multiple of annual expenses (a 4% withdrawal rate).
pub const CORPUS_MULTIPLIER: u32 = 25;

/// Inputs for [`calculate_retirement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Today's monthly expenses.
    pub monthly_expenses: Decimal,
    /// Annual inflation in percent.
    pub inflation_percent: Decimal,
    /// Savings already set aside for retirement.
    pub current_savings: Decimal,
    /// Annual return in percent on savings and new investments.
    pub expected_return_percent: Decimal,
}

/// Result of [`calculate_retirement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub years_to_retirement: u32,
    /// Years the corpus has to fund, up to [`LIFE_EXPECTANCY_AGE`].
    /// Informational only; the corpus formula does not use it.
    pub retirement_years: u32,
    /// Monthly expenses in retirement-date money.
    pub future_monthly_expenses: Decimal,
    pub retirement_corpus: Decimal,
    /// Current savings grown to the retirement date.
    pub future_value_of_savings: Decimal,
    /// Monthly investment still required. Zero when savings already cover
    /// the corpus.
    pub monthly_sip: Decimal,
}

/// Sizes the retirement corpus and the monthly SIP that closes the gap.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidRetirementAge`] unless retirement is
/// strictly after the current age, [`CalculationError::Overflow`] when the
/// corpus or grown savings cannot be represented, and [`CalculationError`]
/// for negative amounts or rates.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::{RetirementInput, calculate_retirement};
///
/// let plan = calculate_retirement(&RetirementInput {
///     current_age: 30,
///     retirement_age: 60,
///     monthly_expenses: dec!(50000),
///     inflation_percent: dec!(6),
///     current_savings: dec!(1000000),
///     expected_return_percent: dec!(8),
/// })
/// .unwrap();
///
/// assert_eq!(plan.years_to_retirement, 30);
/// assert_eq!(plan.retirement_years, 30);
/// assert_eq!(plan.retirement_corpus.round(), dec!(86152368));
/// ```
pub fn calculate_retirement(input: &RetirementInput) -> Result<RetirementPlan, CalculationError> {
    if input.retirement_age <= input.current_age {
        return Err(CalculationError::InvalidRetirementAge {
            current_age: input.current_age,
            retirement_age: input.retirement_age,
        });
    }
    ensure_non_negative("monthly expenses", input.monthly_expenses)?;
    ensure_non_negative("current savings", input.current_savings)?;
    ensure_non_negative_rate("inflation", input.inflation_percent)?;
    ensure_non_negative_rate("expected return", input.expected_return_percent)?;

    let years_to_retirement = input.retirement_age - input.current_age;
    let retirement_years = LIFE_EXPECTANCY_AGE.saturating_sub(input.retirement_age);

    let inflation = percent_to_rate(input.inflation_percent);
    let future_monthly_expenses = checked_mul(
        input.monthly_expenses,
        compound_factor(inflation, years_to_retirement)?,
        years_to_retirement,
    )?;
    let retirement_corpus = checked_mul(
        future_monthly_expenses,
        Decimal::from(MONTHS_PER_YEAR * CORPUS_MULTIPLIER),
        years_to_retirement,
    )?;

    let rate = monthly_rate(input.expected_return_percent);
    let months = months_in(years_to_retirement)?;
    let future_value_of_savings =
        checked_mul(input.current_savings, compound_factor(rate, months)?, months)?;

    // months > 0 because retirement is strictly in the future.
    let shortfall = retirement_corpus - future_value_of_savings;
    let required = checked_div(shortfall, annuity_due_factor(rate, months)?, months)?;
    if required < Decimal::ZERO {
        debug!(%shortfall, "current savings already cover the corpus");
    }

    Ok(RetirementPlan {
        years_to_retirement,
        retirement_years,
        future_monthly_expenses,
        retirement_corpus,
        future_value_of_savings,
        monthly_sip: max(required, Decimal::ZERO),
    })
}
