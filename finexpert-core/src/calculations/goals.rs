//! Multi-goal planning with inflation-adjusted returns.
//!
//! Each goal is funded by its own monthly SIP. Returns are first converted
//! to a real rate with the exact Fisher relation
//!
//! ```text
//! real = (1 + nominal) / (1 + inflation) - 1
//! ```
//!
//! and an inflation-adjusted target is deflated to present value with
//! `target / (1 + inflation)^years`. The SIP then solves
//! `fv = sip * ((1 + r)^n - 1) / r` for `r = real / 12`, `n = years * 12`.
//!
//! [`GoalPlanner`] owns the goal list on behalf of the caller; the
//! projections themselves are pure functions of a goal and the
//! [`GoalAssumptions`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalculationError;
use crate::calculations::common::{
    MONTHS_PER_YEAR, checked_add, checked_div, compound_factor, ensure_non_negative,
    ensure_non_negative_rate, months_in, ordinary_annuity_factor, percent_to_rate,
};
use crate::models::{Goal, NewGoal};

/// Market assumptions shared by every goal in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAssumptions {
    /// Nominal annual return in percent.
    pub expected_return_percent: Decimal,
    /// Annual inflation in percent.
    pub inflation_percent: Decimal,
}

/// Required investment for one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub goal_id: u64,
    pub name: String,
    /// Amount the SIP has to accumulate: the deflated target for
    /// inflation-adjusted goals, the nominal target otherwise.
    pub future_value: Decimal,
    /// Real annual return in percent.
    pub real_rate_of_return_percent: Decimal,
    pub monthly_sip: Decimal,
    pub completed: bool,
}

/// Projections for every goal plus the monthly total still to invest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub projections: Vec<GoalProjection>,
    /// Sum of `monthly_sip` over goals that are not completed.
    pub total_monthly_investment: Decimal,
}

/// Real annual return as a fraction, from percentages.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::calculations::real_rate_of_return;
///
/// // Not the additive 8% - 6% = 2%.
/// let real = real_rate_of_return(dec!(8), dec!(6)).unwrap();
/// assert_eq!(real.round_dp(6), dec!(0.018868));
/// ```
///
/// # Errors
///
/// Returns [`CalculationError::NegativeRate`] for negative percentages.
pub fn real_rate_of_return(
    nominal_percent: Decimal,
    inflation_percent: Decimal,
) -> Result<Decimal, CalculationError> {
    ensure_non_negative_rate("expected return", nominal_percent)?;
    ensure_non_negative_rate("inflation", inflation_percent)?;

    let nominal = percent_to_rate(nominal_percent);
    let inflation = percent_to_rate(inflation_percent);
    Ok((Decimal::ONE + nominal) / (Decimal::ONE + inflation) - Decimal::ONE)
}

/// Computes the monthly SIP needed for a single goal.
///
/// A zero-year goal, or one whose real return is not positive, needs no
/// SIP under this model and resolves to zero.
///
/// # Errors
///
/// Returns [`CalculationError`] for a negative target or rate, or on
/// overflow.
pub fn project_goal(
    goal: &Goal,
    assumptions: &GoalAssumptions,
) -> Result<GoalProjection, CalculationError> {
    ensure_non_negative("target amount", goal.target_amount)?;

    let real_rate = real_rate_of_return(
        assumptions.expected_return_percent,
        assumptions.inflation_percent,
    )?;

    let future_value = if goal.inflation_adjusted {
        let inflation = percent_to_rate(assumptions.inflation_percent);
        checked_div(
            goal.target_amount,
            compound_factor(inflation, goal.years)?,
            goal.years,
        )?
    } else {
        goal.target_amount
    };

    let rate = real_rate / Decimal::from(MONTHS_PER_YEAR);
    let months = months_in(goal.years)?;

    let monthly_sip = if months == 0 || rate <= Decimal::ZERO {
        debug!(goal = %goal.name, %rate, months, "degenerate goal; no SIP required");
        Decimal::ZERO
    } else {
        checked_div(future_value, ordinary_annuity_factor(rate, months)?, months)?
    };

    Ok(GoalProjection {
        goal_id: goal.id,
        name: goal.name.clone(),
        future_value,
        real_rate_of_return_percent: real_rate * Decimal::ONE_HUNDRED,
        monthly_sip,
        completed: goal.completed,
    })
}

/// Caller-owned list of goals and the assumptions used to plan them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPlanner {
    goals: Vec<Goal>,
    assumptions: GoalAssumptions,
    next_id: u64,
}

impl GoalPlanner {
    pub fn new(assumptions: GoalAssumptions) -> Self {
        Self {
            goals: Vec::new(),
            assumptions,
            next_id: 1,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn assumptions(&self) -> &GoalAssumptions {
        &self.assumptions
    }

    pub fn set_assumptions(
        &mut self,
        assumptions: GoalAssumptions,
    ) {
        self.assumptions = assumptions;
    }

    /// Adds a goal and returns its id. Ids are never reused.
    pub fn add_goal(
        &mut self,
        goal: NewGoal,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.goals.push(Goal {
            id,
            name: goal.name,
            target_amount: goal.target_amount,
            years: goal.years,
            priority: goal.priority,
            inflation_adjusted: goal.inflation_adjusted,
            completed: false,
        });
        id
    }

    /// Removes a goal. Returns `false` if no goal has that id.
    pub fn remove_goal(
        &mut self,
        id: u64,
    ) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != before
    }

    /// Flips a goal's completion flag and returns the new value.
    pub fn toggle_completed(
        &mut self,
        id: u64,
    ) -> Option<bool> {
        let goal = self.goals.iter_mut().find(|g| g.id == id)?;
        goal.completed = !goal.completed;
        Some(goal.completed)
    }

    /// Projects every goal with the current assumptions.
    ///
    /// # Errors
    ///
    /// Fails on the first goal that cannot be projected, or with
    /// [`CalculationError::Overflow`] if the monthly total cannot be
    /// represented.
    pub fn plan(&self) -> Result<GoalPlan, CalculationError> {
        let projections = self
            .goals
            .iter()
            .map(|goal| project_goal(goal, &self.assumptions))
            .collect::<Result<Vec<_>, _>>()?;

        let total_monthly_investment = projections
            .iter()
            .filter(|p| !p.completed)
            .try_fold(Decimal::ZERO, |total, p| {
                checked_add(total, p.monthly_sip, 1)
            })?;

        Ok(GoalPlan {
            projections,
            total_monthly_investment,
        })
    }
}
