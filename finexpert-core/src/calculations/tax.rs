//! Federal income tax estimate with a standard-versus-itemized comparison.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Above-the-line deductions: student loan interest (capped at $2,500) + IRA contributions + educator expenses |
//! | 2 | Itemized deductions: state and local taxes (capped at $10,000) + mortgage interest + charitable contributions + medical expenses above 7.5% of income |
//! | 3 | Deduction used: the larger of the standard deduction and step 2 |
//! | 4 | Taxable income: income - step 1 - step 3, minimum 0 |
//! | 5 | Tax: taxable income × the marginal rate of the bracket it falls in |
//!
//! Step 5 applies one marginal rate to the whole taxable income instead of
//! summing tax bracket by bracket, so it overstates the liability of anyone
//! above the first bracket. The estimate is kept that way on purpose; see
//! [`TaxResult::marginal_rate`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finexpert_core::calculations::{DeductionType, TaxCalculator, TaxInput};
//! use finexpert_core::{FilingStatus, TaxTable};
//!
//! let table = TaxTable::builtin();
//! let input = TaxInput::new(FilingStatus::Single, dec!(100000));
//!
//! let result = TaxCalculator::new(&table).calculate(&input).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(86150));
//! assert_eq!(result.marginal_rate, dec!(0.22));
//! assert_eq!(result.tax_owed, dec!(18953));
//! assert_eq!(result.recommended_deduction_type, DeductionType::Standard);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::CalculationError;
use crate::calculations::common::{checked_add, checked_mul, checked_sub, ensure_non_negative, max};
use crate::models::{FilingStatus, TaxTable};

/// Most student loan interest deductible above the line.
pub const STUDENT_LOAN_INTEREST_CAP: Decimal = dec!(2500);

/// Cap on deductible state and local taxes.
pub const STATE_LOCAL_TAX_CAP: Decimal = dec!(10000);

/// Share of income that medical expenses must exceed to be deductible.
pub const MEDICAL_EXPENSE_AGI_FLOOR: Decimal = dec!(0.075);

/// The estimate covers a single year.
const TAX_YEAR: u32 = 1;

/// Errors that can occur during tax calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxCalculatorError {
    /// The table has no brackets for the filing status.
    #[error("no tax brackets provided for {0:?}")]
    NoTaxBrackets(FilingStatus),

    /// No bracket covers the taxable income.
    #[error("no tax bracket found for taxable income {0}")]
    NoMatchingBracket(Decimal),

    /// The table has no standard deduction for the filing status.
    #[error("no standard deduction for {0:?}")]
    NoStandardDeduction(FilingStatus),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// Income and deduction components for one return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,

    // Above-the-line
    pub student_loan_interest: Decimal,
    pub ira_contributions: Decimal,
    pub educator_expenses: Decimal,

    // Itemizable
    pub state_local_taxes: Decimal,
    pub mortgage_interest: Decimal,
    pub charitable_contributions: Decimal,
    pub medical_expenses: Decimal,
}

impl TaxInput {
    /// Input with only income filled in; every deduction is zero.
    pub fn new(
        filing_status: FilingStatus,
        gross_income: Decimal,
    ) -> Self {
        Self {
            filing_status,
            gross_income,
            student_loan_interest: Decimal::ZERO,
            ira_contributions: Decimal::ZERO,
            educator_expenses: Decimal::ZERO,
            state_local_taxes: Decimal::ZERO,
            mortgage_interest: Decimal::ZERO,
            charitable_contributions: Decimal::ZERO,
            medical_expenses: Decimal::ZERO,
        }
    }
}

/// Which deduction produced the lower tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionType {
    Standard,
    Itemized,
}

/// Result of [`TaxCalculator::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub above_the_line_deductions: Decimal,
    pub itemized_deductions: Decimal,
    pub standard_deduction: Decimal,
    /// The larger of the standard and itemized deductions.
    pub deduction_used: Decimal,
    pub recommended_deduction_type: DeductionType,
    pub taxable_income: Decimal,
    /// Rate of the bracket containing the taxable income, applied to all
    /// of it. Zero when there is no taxable income.
    pub marginal_rate: Decimal,
    pub tax_owed: Decimal,
}

/// Calculator bound to a rate table.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    table: &'a TaxTable,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    /// Estimates the tax owed.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculatorError`] if:
    /// - any amount in the input is negative
    /// - the table has no standard deduction or no brackets for the status
    /// - no bracket covers the taxable income
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> Result<TaxResult, TaxCalculatorError> {
        self.validate(input)?;

        let status = input.filing_status;
        let standard_deduction = self
            .table
            .standard_deduction_for(status)
            .ok_or(TaxCalculatorError::NoStandardDeduction(status))?;

        let above_the_line = self.above_the_line(input)?;
        let itemized = self.itemized(input)?;
        let (deduction_used, recommended_deduction_type) =
            self.determine_deduction(standard_deduction, itemized);

        let taxable_income =
            self.taxable_income(input.gross_income, above_the_line, deduction_used)?;
        let marginal_rate = self.marginal_rate(status, taxable_income)?;
        let tax_owed = checked_mul(taxable_income, marginal_rate, TAX_YEAR)?;

        Ok(TaxResult {
            above_the_line_deductions: above_the_line,
            itemized_deductions: itemized,
            standard_deduction,
            deduction_used,
            recommended_deduction_type,
            taxable_income,
            marginal_rate,
            tax_owed,
        })
    }

    fn validate(
        &self,
        input: &TaxInput,
    ) -> Result<(), CalculationError> {
        ensure_non_negative("gross income", input.gross_income)?;
        ensure_non_negative("student loan interest", input.student_loan_interest)?;
        ensure_non_negative("IRA contributions", input.ira_contributions)?;
        ensure_non_negative("educator expenses", input.educator_expenses)?;
        ensure_non_negative("state and local taxes", input.state_local_taxes)?;
        ensure_non_negative("mortgage interest", input.mortgage_interest)?;
        ensure_non_negative("charitable contributions", input.charitable_contributions)?;
        ensure_non_negative("medical expenses", input.medical_expenses)?;
        Ok(())
    }

    /// Deductions taken regardless of itemizing.
    fn above_the_line(
        &self,
        input: &TaxInput,
    ) -> Result<Decimal, CalculationError> {
        [input.ira_contributions, input.educator_expenses]
            .into_iter()
            .try_fold(input.student_loan_interest.min(STUDENT_LOAN_INTEREST_CAP), |sum, d| {
                checked_add(sum, d, TAX_YEAR)
            })
    }

    /// Total itemized deductions.
    fn itemized(
        &self,
        input: &TaxInput,
    ) -> Result<Decimal, CalculationError> {
        let medical_floor = input.gross_income * MEDICAL_EXPENSE_AGI_FLOOR;
        let medical = max(input.medical_expenses - medical_floor, Decimal::ZERO);
        [input.mortgage_interest, input.charitable_contributions, medical]
            .into_iter()
            .try_fold(input.state_local_taxes.min(STATE_LOCAL_TAX_CAP), |sum, d| {
                checked_add(sum, d, TAX_YEAR)
            })
    }

    /// Picks the larger deduction; a tie keeps the standard deduction.
    fn determine_deduction(
        &self,
        standard: Decimal,
        itemized: Decimal,
    ) -> (Decimal, DeductionType) {
        if itemized > standard {
            (itemized, DeductionType::Itemized)
        } else {
            (standard, DeductionType::Standard)
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        above_the_line: Decimal,
        deduction: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let remaining = checked_sub(gross_income, above_the_line, TAX_YEAR)?;
        Ok(max(checked_sub(remaining, deduction, TAX_YEAR)?, Decimal::ZERO))
    }

    /// Looks up the rate of the bracket containing `taxable_income`.
    fn marginal_rate(
        &self,
        status: FilingStatus,
        taxable_income: Decimal,
    ) -> Result<Decimal, TaxCalculatorError> {
        let mut brackets = self.table.brackets_for(status).peekable();
        if brackets.peek().is_none() {
            return Err(TaxCalculatorError::NoTaxBrackets(status));
        }

        if taxable_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        brackets
            .find(|b| b.contains(taxable_income))
            .map(|b| b.tax_rate)
            .ok_or_else(|| {
                warn!(?status, %taxable_income, "taxable income outside every bracket");
                TaxCalculatorError::NoMatchingBracket(taxable_income)
            })
    }
}
