//! Purchase affordability check for buying on EMI.
//!
//! A purchase is affordable when its installment takes no more than
//! [`EMI_AFFORDABILITY_THRESHOLD`] percent of the buyer's disposable income
//! (income minus expenses).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finexpert_core::calculations::{AffordabilityInput, AffordabilityResult, analyze_purchase};
//!
//! let input = AffordabilityInput {
//!     income: Some(dec!(80000)),
//!     expenses: Some(dec!(50000)),
//!     item_price: Some(dec!(90000)),
//!     annual_rate_percent: Some(dec!(0)),
//!     duration_months: Some(12),
//! };
//!
//! let AffordabilityResult::Assessed(assessment) = analyze_purchase(&input).unwrap() else {
//!     panic!("all fields were provided");
//! };
//!
//! assert_eq!(assessment.emi, Some(dec!(7500)));
//! assert_eq!(assessment.affordability_ratio, Some(dec!(25)));
//! assert!(assessment.is_affordable);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{checked_div, checked_mul, checked_sub, round_half_up};
use crate::calculations::{CalculationError, calculate_emi};

/// Largest share of disposable income, in percent, an installment may take.
pub const EMI_AFFORDABILITY_THRESHOLD: Decimal = dec!(30);

/// Prompt returned while any input is still missing.
pub const NEEDS_MORE_INFO_MESSAGE: &str = "Please provide income, expenses, item price, \
     interest rate (annual %), and loan duration (months) for analysis.";

/// What the buyer has told us so far. Every field is optional because the
/// analysis is usually requested before the picture is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Monthly income.
    pub income: Option<Decimal>,
    /// Monthly expenses.
    pub expenses: Option<Decimal>,
    /// Price of the item to be financed.
    pub item_price: Option<Decimal>,
    /// Annual loan interest rate in percent.
    pub annual_rate_percent: Option<Decimal>,
    /// Loan duration in months.
    pub duration_months: Option<u32>,
}

/// Outcome of [`analyze_purchase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordabilityResult {
    /// At least one input is missing; nothing was computed.
    NeedsMoreInfo { message: String },
    /// All inputs were present.
    Assessed(AffordabilityAssessment),
}

/// A completed affordability assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    /// Income left after expenses. May be zero or negative.
    pub disposable_income: Decimal,

    /// Monthly installment. `None` when there is no disposable income.
    pub emi: Option<Decimal>,

    /// Installment as a percentage of disposable income.
    /// `None` when there is no disposable income.
    pub affordability_ratio: Option<Decimal>,

    /// Whether the ratio is within [`EMI_AFFORDABILITY_THRESHOLD`].
    pub is_affordable: bool,

    /// Human-readable advice.
    pub recommendation: String,
}

/// Decides whether a purchase on EMI fits the buyer's budget.
///
/// Missing input is not an error: the result is
/// [`AffordabilityResult::NeedsMoreInfo`].
///
/// # Errors
///
/// Propagates [`CalculationError`] from [`calculate_emi`] (negative item
/// price, overflow).
pub fn analyze_purchase(
    input: &AffordabilityInput
) -> Result<AffordabilityResult, CalculationError> {
    let (Some(income), Some(expenses), Some(item_price), Some(rate), Some(months)) = (
        input.income,
        input.expenses,
        input.item_price,
        input.annual_rate_percent,
        input.duration_months,
    ) else {
        debug!(?input, "affordability input incomplete");
        return Ok(AffordabilityResult::NeedsMoreInfo {
            message: NEEDS_MORE_INFO_MESSAGE.to_string(),
        });
    };

    let disposable_income = checked_sub(income, expenses, 1)?;
    if disposable_income <= Decimal::ZERO {
        return Ok(AffordabilityResult::Assessed(AffordabilityAssessment {
            disposable_income,
            emi: None,
            affordability_ratio: None,
            is_affordable: false,
            recommendation: "Your expenses meet or exceed your income. \
                             Purchasing on EMI is not advisable."
                .to_string(),
        }));
    }

    let emi = calculate_emi(item_price, rate, months)?;
    let ratio = checked_mul(
        checked_div(emi, disposable_income, months)?,
        Decimal::ONE_HUNDRED,
        months,
    )?;
    let is_affordable = ratio <= EMI_AFFORDABILITY_THRESHOLD;

    Ok(AffordabilityResult::Assessed(AffordabilityAssessment {
        disposable_income,
        emi: Some(emi),
        affordability_ratio: Some(ratio),
        is_affordable,
        recommendation: recommendation(emi, ratio, is_affordable),
    }))
}

fn recommendation(
    emi: Decimal,
    ratio: Decimal,
    is_affordable: bool,
) -> String {
    let emi = round_half_up(emi);
    let ratio = ratio.round_dp(1);
    if is_affordable {
        format!(
            "Affordable: The estimated EMI ({emi}) is {ratio}% of your disposable income \
             (within {EMI_AFFORDABILITY_THRESHOLD}% threshold)."
        )
    } else {
        format!(
            "Caution: This purchase might strain your budget. The estimated EMI ({emi}) is \
             {ratio}% of your disposable income (>{EMI_AFFORDABILITY_THRESHOLD}% threshold)."
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn complete_input() -> AffordabilityInput {
        AffordabilityInput {
            income: Some(dec!(100000)),
            expenses: Some(dec!(60000)),
            item_price: Some(dec!(120000)),
            annual_rate_percent: Some(dec!(0)),
            duration_months: Some(12),
        }
    }

    fn assess(input: &AffordabilityInput) -> AffordabilityAssessment {
        match analyze_purchase(input).unwrap() {
            AffordabilityResult::Assessed(assessment) => assessment,
            other => panic!("expected an assessment, got {other:?}"),
        }
    }

    // =========================================================================
    // incomplete input
    // =========================================================================

    #[test]
    fn missing_income_needs_more_info() {
        let mut input = complete_input();
        input.income = None;

        let result = analyze_purchase(&input).unwrap();

        assert_eq!(
            result,
            AffordabilityResult::NeedsMoreInfo {
                message: NEEDS_MORE_INFO_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn missing_duration_needs_more_info() {
        let mut input = complete_input();
        input.duration_months = None;

        let result = analyze_purchase(&input).unwrap();

        assert!(matches!(result, AffordabilityResult::NeedsMoreInfo { .. }));
    }

    #[test]
    fn empty_input_needs_more_info() {
        let result = analyze_purchase(&AffordabilityInput::default()).unwrap();

        assert!(matches!(result, AffordabilityResult::NeedsMoreInfo { .. }));
    }

    // =========================================================================
    // disposable income
    // =========================================================================

    #[test]
    fn expenses_equal_to_income_is_not_affordable() {
        let mut input = complete_input();
        input.expenses = Some(dec!(100000));

        let assessment = assess(&input);

        assert_eq!(assessment.disposable_income, dec!(0));
        assert_eq!(assessment.emi, None);
        assert_eq!(assessment.affordability_ratio, None);
        assert!(!assessment.is_affordable);
    }

    #[test]
    fn expenses_above_income_keeps_negative_disposable_income() {
        let mut input = complete_input();
        input.expenses = Some(dec!(110000));

        let assessment = assess(&input);

        assert_eq!(assessment.disposable_income, dec!(-10000));
        assert!(!assessment.is_affordable);
    }

    #[test]
    fn disposable_income_overflow_is_reported() {
        let mut input = complete_input();
        input.income = Some(Decimal::MAX);
        input.expenses = Some(dec!(-1));

        assert_eq!(
            analyze_purchase(&input),
            Err(CalculationError::Overflow { periods: 1 })
        );
    }

    #[test]
    fn ratio_overflow_is_reported() {
        let input = AffordabilityInput {
            income: Some(dec!(100.01)),
            expenses: Some(dec!(100)),
            item_price: Some(Decimal::MAX / dec!(10)),
            annual_rate_percent: Some(dec!(0)),
            duration_months: Some(1),
        };

        assert_eq!(
            analyze_purchase(&input),
            Err(CalculationError::Overflow { periods: 1 })
        );
    }

    // =========================================================================
    // threshold
    // =========================================================================

    #[test]
    fn ratio_below_threshold_is_affordable() {
        let assessment = assess(&complete_input());

        // EMI 10000 on 40000 disposable = 25%
        assert_eq!(assessment.emi, Some(dec!(10000)));
        assert_eq!(assessment.affordability_ratio, Some(dec!(25)));
        assert!(assessment.is_affordable);
        assert!(assessment.recommendation.starts_with("Affordable"));
    }

    #[test]
    fn ratio_exactly_at_threshold_is_affordable() {
        let mut input = complete_input();
        input.item_price = Some(dec!(144000));

        let assessment = assess(&input);

        // EMI 12000 on 40000 disposable = 30%
        assert_eq!(assessment.affordability_ratio, Some(dec!(30)));
        assert!(assessment.is_affordable);
    }

    #[test]
    fn ratio_above_threshold_is_not_affordable() {
        let mut input = complete_input();
        input.item_price = Some(dec!(144012));

        let assessment = assess(&input);

        assert!(!assessment.is_affordable);
        assert!(assessment.recommendation.starts_with("Caution"));
    }

    #[test]
    fn recommendation_quotes_rounded_figures() {
        let mut input = complete_input();
        input.item_price = Some(dec!(500000));
        input.annual_rate_percent = Some(dec!(10));

        let assessment = assess(&input);

        // EMI 43957.94 on 40000 disposable = 109.9%
        assert_eq!(
            assessment.recommendation,
            "Caution: This purchase might strain your budget. The estimated EMI (43957.94) is \
             109.9% of your disposable income (>30% threshold)."
        );
    }

    #[test]
    fn negative_item_price_is_rejected() {
        let mut input = complete_input();
        input.item_price = Some(dec!(-5));

        assert!(analyze_purchase(&input).is_err());
    }
}
