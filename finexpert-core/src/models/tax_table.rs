use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, StandardDeduction, TaxBracket};

/// Rate schedule and standard deductions for every filing status.
///
/// Brackets for one status are expected in ascending `min_income` order,
/// the last one open-ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    brackets: Vec<TaxBracket>,
    standard_deductions: Vec<StandardDeduction>,
}

impl TaxTable {
    pub fn new(
        brackets: Vec<TaxBracket>,
        standard_deductions: Vec<StandardDeduction>,
    ) -> Self {
        Self {
            brackets,
            standard_deductions,
        }
    }

    /// The 2023 US federal schedule.
    pub fn builtin() -> Self {
        use FilingStatus::*;

        let schedule = |status: FilingStatus, limits: [Decimal; 6]| {
            let rates = [
                dec!(0.10),
                dec!(0.12),
                dec!(0.22),
                dec!(0.24),
                dec!(0.32),
                dec!(0.35),
                dec!(0.37),
            ];
            let mut min_income = Decimal::ZERO;
            rates
                .into_iter()
                .enumerate()
                .map(move |(i, tax_rate)| {
                    let max_income = limits.get(i).copied();
                    let bracket = TaxBracket {
                        filing_status: status,
                        min_income,
                        max_income,
                        tax_rate,
                    };
                    min_income = max_income.unwrap_or(min_income);
                    bracket
                })
                .collect::<Vec<_>>()
        };

        let mut brackets = schedule(
            Single,
            [
                dec!(11000),
                dec!(44725),
                dec!(95375),
                dec!(182100),
                dec!(231250),
                dec!(578125),
            ],
        );
        brackets.extend(schedule(
            Married,
            [
                dec!(22000),
                dec!(89450),
                dec!(190750),
                dec!(364200),
                dec!(462500),
                dec!(693750),
            ],
        ));
        brackets.extend(schedule(
            HeadOfHousehold,
            [
                dec!(15700),
                dec!(59850),
                dec!(95350),
                dec!(182100),
                dec!(231250),
                dec!(578100),
            ],
        ));

        let standard_deductions = vec![
            StandardDeduction {
                filing_status: Single,
                amount: dec!(13850),
            },
            StandardDeduction {
                filing_status: Married,
                amount: dec!(27700),
            },
            StandardDeduction {
                filing_status: HeadOfHousehold,
                amount: dec!(20800),
            },
        ];

        Self::new(brackets, standard_deductions)
    }

    /// Replaces every bracket, keeping the standard deductions.
    pub fn with_brackets(
        mut self,
        brackets: Vec<TaxBracket>,
    ) -> Self {
        self.brackets = brackets;
        self
    }

    /// Replaces every standard deduction, keeping the brackets.
    pub fn with_standard_deductions(
        mut self,
        standard_deductions: Vec<StandardDeduction>,
    ) -> Self {
        self.standard_deductions = standard_deductions;
        self
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn standard_deductions(&self) -> &[StandardDeduction] {
        &self.standard_deductions
    }

    /// Brackets for one filing status, in table order.
    pub fn brackets_for(
        &self,
        status: FilingStatus,
    ) -> impl Iterator<Item = &TaxBracket> {
        self.brackets
            .iter()
            .filter(move |b| b.filing_status == status)
    }

    pub fn standard_deduction_for(
        &self,
        status: FilingStatus,
    ) -> Option<Decimal> {
        self.standard_deductions
            .iter()
            .find(|d| d.filing_status == status)
            .map(|d| d.amount)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_has_seven_brackets_per_status() {
        let table = TaxTable::builtin();

        for status in FilingStatus::all() {
            assert_eq!(table.brackets_for(*status).count(), 7, "{status:?}");
        }
    }

    #[test]
    fn builtin_brackets_are_contiguous() {
        let table = TaxTable::builtin();

        for status in FilingStatus::all() {
            let brackets: Vec<_> = table.brackets_for(*status).collect();
            assert_eq!(brackets[0].min_income, Decimal::ZERO);
            for pair in brackets.windows(2) {
                assert_eq!(pair[0].max_income, Some(pair[1].min_income));
            }
            assert_eq!(brackets.last().unwrap().max_income, None);
        }
    }

    #[test]
    fn builtin_standard_deductions() {
        let table = TaxTable::builtin();

        assert_eq!(table.standard_deduction_for(FilingStatus::Single), Some(dec!(13850)));
        assert_eq!(table.standard_deduction_for(FilingStatus::Married), Some(dec!(27700)));
        assert_eq!(
            table.standard_deduction_for(FilingStatus::HeadOfHousehold),
            Some(dec!(20800))
        );
    }

    #[test]
    fn with_brackets_keeps_deductions() {
        let table = TaxTable::builtin().with_brackets(vec![]);

        assert!(table.brackets().is_empty());
        assert_eq!(table.standard_deductions().len(), 3);
    }

    #[test]
    fn empty_table_has_no_deduction() {
        assert_eq!(TaxTable::default().standard_deduction_for(FilingStatus::Single), None);
    }
}
