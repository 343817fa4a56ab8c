//! Portfolio split across equity, debt and gold.
//!
//! Whatever the three named classes leave of 100% is "other" (floored at
//! zero). Rebalancing advice compares the current split with the moderate
//! preset.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{ensure_non_negative, max, percent_to_rate};

/// Percentages of a portfolio held in each asset class.
///
/// Only [`Allocation::new`] and the presets build one, so every share is
/// within 0..=100. Deserializing runs the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AllocationShares")]
pub struct Allocation {
    equity_percent: Decimal,
    debt_percent: Decimal,
    gold_percent: Decimal,
}

/// Unchecked wire form of [`Allocation`].
#[derive(Deserialize)]
struct AllocationShares {
    equity_percent: Decimal,
    debt_percent: Decimal,
    gold_percent: Decimal,
}

impl TryFrom<AllocationShares> for Allocation {
    type Error = CalculationError;

    fn try_from(shares: AllocationShares) -> Result<Self, Self::Error> {
        Allocation::new(shares.equity_percent, shares.debt_percent, shares.gold_percent)
    }
}

/// Built-in model portfolios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationPreset {
    Conservative,
    Moderate,
    Aggressive,
}

impl AllocationPreset {
    pub fn all() -> &'static [AllocationPreset] {
        &[Self::Conservative, Self::Moderate, Self::Aggressive]
    }

    pub fn allocation(&self) -> Allocation {
        let (equity_percent, debt_percent, gold_percent) = match self {
            Self::Conservative => (dec!(40), dec!(50), dec!(10)),
            Self::Moderate => (dec!(60), dec!(30), dec!(10)),
            Self::Aggressive => (dec!(80), dec!(15), dec!(5)),
        };
        Allocation {
            equity_percent,
            debt_percent,
            gold_percent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
        }
    }
}

/// Amount held in each class for a given portfolio size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub total_amount: Decimal,
    pub equity_amount: Decimal,
    pub debt_amount: Decimal,
    pub gold_amount: Decimal,
    pub other_percent: Decimal,
    pub other_amount: Decimal,
}

/// What to do with one asset class to reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebalanceAction {
    Reduce,
    Increase,
    Hold,
}

/// Signed gap between current and target share of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceDelta {
    /// `current - target` in percentage points; positive means overweight.
    pub difference: Decimal,
    pub action: RebalanceAction,
}

impl RebalanceDelta {
    fn between(
        current: Decimal,
        target: Decimal,
    ) -> Self {
        let difference = current - target;
        let action = if difference > Decimal::ZERO {
            RebalanceAction::Reduce
        } else if difference < Decimal::ZERO {
            RebalanceAction::Increase
        } else {
            RebalanceAction::Hold
        };
        Self { difference, action }
    }

    /// Size of the adjustment in percentage points.
    pub fn magnitude(&self) -> Decimal {
        self.difference.abs()
    }
}

/// Per-class rebalancing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceReport {
    pub target: Allocation,
    pub equity: RebalanceDelta,
    pub debt: RebalanceDelta,
    pub gold: RebalanceDelta,
}

impl Allocation {
    /// Validates that every share lies in 0..=100.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::PercentOutOfRange`] for the first share
    /// outside the range.
    pub fn new(
        equity_percent: Decimal,
        debt_percent: Decimal,
        gold_percent: Decimal,
    ) -> Result<Self, CalculationError> {
        for (field, value) in [
            ("equity", equity_percent),
            ("debt", debt_percent),
            ("gold", gold_percent),
        ] {
            if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&value) {
                return Err(CalculationError::PercentOutOfRange { field, value });
            }
        }
        Ok(Self {
            equity_percent,
            debt_percent,
            gold_percent,
        })
    }

    pub fn equity_percent(&self) -> Decimal {
        self.equity_percent
    }

    pub fn debt_percent(&self) -> Decimal {
        self.debt_percent
    }

    pub fn gold_percent(&self) -> Decimal {
        self.gold_percent
    }

    /// Remaining share after equity, debt and gold; never negative.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use finexpert_core::calculations::Allocation;
    ///
    /// let allocation = Allocation::new(dec!(50), dec!(30), dec!(5)).unwrap();
    /// assert_eq!(allocation.other_percent(), dec!(15));
    ///
    /// let overweight = Allocation::new(dec!(70), dec!(30), dec!(10)).unwrap();
    /// assert_eq!(overweight.other_percent(), dec!(0));
    /// ```
    pub fn other_percent(&self) -> Decimal {
        max(
            Decimal::ONE_HUNDRED - self.equity_percent - self.debt_percent - self.gold_percent,
            Decimal::ZERO,
        )
    }

    /// Splits `total_amount` according to this allocation.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NegativeAmount`] for a negative total.
    pub fn breakdown(
        &self,
        total_amount: Decimal,
    ) -> Result<AllocationBreakdown, CalculationError> {
        ensure_non_negative("total amount", total_amount)?;

        let share = |percent: Decimal| total_amount * percent_to_rate(percent);
        let other_percent = self.other_percent();
        Ok(AllocationBreakdown {
            total_amount,
            equity_amount: share(self.equity_percent),
            debt_amount: share(self.debt_percent),
            gold_amount: share(self.gold_percent),
            other_percent,
            other_amount: share(other_percent),
        })
    }
}

/// Compares `current` with the moderate preset.
pub fn rebalance(current: &Allocation) -> RebalanceReport {
    let target = AllocationPreset::Moderate.allocation();
    RebalanceReport {
        target,
        equity: RebalanceDelta::between(current.equity_percent, target.equity_percent),
        debt: RebalanceDelta::between(current.debt_percent, target.debt_percent),
        gold: RebalanceDelta::between(current.gold_percent, target.gold_percent),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // Allocation tests
    // =========================================================================

    #[test]
    fn presets_sum_to_one_hundred() {
        for preset in AllocationPreset::all() {
            let allocation = preset.allocation();
            assert_eq!(allocation.other_percent(), dec!(0), "{preset:?}");
        }
    }

    #[test]
    fn other_percent_fills_the_gap() {
        let allocation = Allocation::new(dec!(55), dec!(25), dec!(5)).unwrap();

        assert_eq!(allocation.other_percent(), dec!(15));
    }

    #[test]
    fn other_percent_is_floored_at_zero() {
        let allocation = Allocation::new(dec!(100), dec!(100), dec!(100)).unwrap();

        assert_eq!(allocation.other_percent(), dec!(0));
    }

    #[test]
    fn share_above_one_hundred_is_rejected() {
        assert_eq!(
            Allocation::new(dec!(60), dec!(100.5), dec!(10)),
            Err(CalculationError::PercentOutOfRange {
                field: "debt",
                value: dec!(100.5),
            })
        );
    }

    #[test]
    fn negative_share_is_rejected() {
        assert!(Allocation::new(dec!(-1), dec!(30), dec!(10)).is_err());
    }

    #[test]
    fn accessors_return_validated_shares() {
        let allocation = Allocation::new(dec!(55), dec!(25), dec!(5)).unwrap();

        assert_eq!(allocation.equity_percent(), dec!(55));
        assert_eq!(allocation.debt_percent(), dec!(25));
        assert_eq!(allocation.gold_percent(), dec!(5));
    }

    #[test]
    fn wire_form_goes_through_the_range_check() {
        let shares = AllocationShares {
            equity_percent: dec!(150),
            debt_percent: dec!(30),
            gold_percent: dec!(10),
        };

        assert_eq!(
            Allocation::try_from(shares),
            Err(CalculationError::PercentOutOfRange {
                field: "equity",
                value: dec!(150),
            })
        );
    }

    // =========================================================================
    // breakdown tests
    // =========================================================================

    #[test]
    fn breakdown_splits_total() {
        let allocation = Allocation::new(dec!(50), dec!(30), dec!(10)).unwrap();

        let breakdown = allocation.breakdown(dec!(1000000)).unwrap();

        assert_eq!(breakdown.equity_amount, dec!(500000));
        assert_eq!(breakdown.debt_amount, dec!(300000));
        assert_eq!(breakdown.gold_amount, dec!(100000));
        assert_eq!(breakdown.other_percent, dec!(10));
        assert_eq!(breakdown.other_amount, dec!(100000));
    }

    #[test]
    fn breakdown_rejects_negative_total() {
        let allocation = AllocationPreset::Moderate.allocation();

        assert!(allocation.breakdown(dec!(-100)).is_err());
    }

    // =========================================================================
    // rebalance tests
    // =========================================================================

    #[test]
    fn rebalance_reports_signed_differences() {
        let current = Allocation::new(dec!(75), dec!(20), dec!(10)).unwrap();

        let report = rebalance(&current);

        assert_eq!(report.target, AllocationPreset::Moderate.allocation());
        assert_eq!(
            report.equity,
            RebalanceDelta {
                difference: dec!(15),
                action: RebalanceAction::Reduce,
            }
        );
        assert_eq!(
            report.debt,
            RebalanceDelta {
                difference: dec!(-10),
                action: RebalanceAction::Increase,
            }
        );
        assert_eq!(report.gold.action, RebalanceAction::Hold);
        assert_eq!(report.debt.magnitude(), dec!(10));
    }

    #[test]
    fn moderate_portfolio_needs_no_rebalancing() {
        let report = rebalance(&AllocationPreset::Moderate.allocation());

        assert_eq!(report.equity.action, RebalanceAction::Hold);
        assert_eq!(report.debt.action, RebalanceAction::Hold);
        assert_eq!(report.gold.action, RebalanceAction::Hold);
    }
}
