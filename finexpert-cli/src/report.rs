//! Plain-text rendering of calculator results.
//!
//! Rupee amounts use Indian digit grouping; the US tax report uses dollars.

use std::fmt;

use finexpert_core::RegistrationType;
use finexpert_core::calculations::{
    AffordabilityResult, Allocation, AllocationBreakdown, DeductionType, GoalPlan, GstComponents,
    GstResult, LumpsumResult, PpfResult, RebalanceAction, RebalanceDelta, RebalanceReport,
    RetirementPlan, SimpleInterestResult, SipResult, TaxResult,
};
use rust_decimal::Decimal;

use crate::utils::{format_inr, format_percent, format_usd};

pub struct EmiReport {
    pub principal: Decimal,
    pub emi: Decimal,
    /// Sum of all installments.
    pub total_payment: Decimal,
}

impl fmt::Display for EmiReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Monthly EMI:     {}", format_inr(self.emi))?;
        writeln!(f, "Total payment:   {}", format_inr(self.total_payment))?;
        writeln!(
            f,
            "Total interest:  {}",
            format_inr(self.total_payment - self.principal)
        )
    }
}

pub struct AffordabilityReport<'a>(pub &'a AffordabilityResult);

impl fmt::Display for AffordabilityReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let assessment = match self.0 {
            AffordabilityResult::NeedsMoreInfo { message } => return writeln!(f, "{message}"),
            AffordabilityResult::Assessed(assessment) => assessment,
        };

        writeln!(
            f,
            "Disposable income:  {}",
            format_inr(assessment.disposable_income)
        )?;
        if let Some(emi) = assessment.emi {
            writeln!(f, "Estimated EMI:      {}", format_inr(emi))?;
        }
        if let Some(ratio) = assessment.affordability_ratio {
            writeln!(f, "Share of income:    {}", format_percent(ratio))?;
        }
        let verdict = if assessment.is_affordable {
            "affordable"
        } else {
            "not affordable"
        };
        writeln!(f, "Verdict:            {verdict}")?;
        writeln!(f)?;
        writeln!(f, "{}", assessment.recommendation)
    }
}

pub struct SipReport<'a>(pub &'a SipResult);

impl fmt::Display for SipReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Future value:       {}", format_inr(self.0.future_value))?;
        writeln!(f, "Total invested:     {}", format_inr(self.0.total_invested))?;
        writeln!(f, "Estimated returns:  {}", format_inr(self.0.estimated_returns))
    }
}

pub struct LumpsumReport<'a> {
    pub result: &'a LumpsumResult,
    pub breakdown: bool,
}

impl fmt::Display for LumpsumReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Future value:   {}", format_inr(self.result.future_value))?;
        writeln!(f, "Total returns:  {}", format_inr(self.result.total_returns))?;
        if self.breakdown && !self.result.yearly_breakdown.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:>4}  {:>18}  {:>18}", "Year", "Value", "Returns")?;
            for year in &self.result.yearly_breakdown {
                writeln!(
                    f,
                    "{:>4}  {:>18}  {:>18}",
                    year.year,
                    format_inr(year.value),
                    format_inr(year.returns)
                )?;
            }
        }
        Ok(())
    }
}

pub struct PpfReport<'a> {
    pub result: &'a PpfResult,
    pub breakdown: bool,
}

impl fmt::Display for PpfReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Maturity value:    {}", format_inr(self.result.maturity_value))?;
        writeln!(f, "Total investment:  {}", format_inr(self.result.total_investment))?;
        writeln!(f, "Total interest:    {}", format_inr(self.result.total_interest))?;
        if self.breakdown && !self.result.yearly_data.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{:>4}  {:>14}  {:>14}  {:>16}",
                "Year", "Deposit", "Interest", "Balance"
            )?;
            for year in &self.result.yearly_data {
                writeln!(
                    f,
                    "{:>4}  {:>14}  {:>14}  {:>16}",
                    year.year,
                    format_inr(year.investment),
                    format_inr(year.interest),
                    format_inr(year.balance)
                )?;
            }
        }
        Ok(())
    }
}

pub struct RetirementReport<'a>(pub &'a RetirementPlan);

impl fmt::Display for RetirementReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "Years to retirement:       {}", plan.years_to_retirement)?;
        writeln!(f, "Years in retirement:       {}", plan.retirement_years)?;
        writeln!(
            f,
            "Monthly expenses then:     {}",
            format_inr(plan.future_monthly_expenses)
        )?;
        writeln!(f, "Corpus needed:             {}", format_inr(plan.retirement_corpus))?;
        writeln!(
            f,
            "Current savings grow to:   {}",
            format_inr(plan.future_value_of_savings)
        )?;
        writeln!(f, "Monthly SIP required:      {}", format_inr(plan.monthly_sip))
    }
}

pub struct GoalsReport<'a>(pub &'a GoalPlan);

impl fmt::Display for GoalsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for projection in &self.0.projections {
            let status = if projection.completed { " (completed)" } else { "" };
            writeln!(f, "{}{status}", projection.name)?;
            writeln!(f, "  Amount to build:  {}", format_inr(projection.future_value))?;
            writeln!(
                f,
                "  Real return:      {}",
                format_percent(projection.real_rate_of_return_percent)
            )?;
            writeln!(f, "  Monthly SIP:      {}", format_inr(projection.monthly_sip))?;
        }
        writeln!(
            f,
            "Total monthly investment: {}",
            format_inr(self.0.total_monthly_investment)
        )
    }
}

pub struct AllocationReport<'a> {
    pub allocation: &'a Allocation,
    pub breakdown: &'a AllocationBreakdown,
    pub rebalance: &'a RebalanceReport,
}

fn advice(delta: &RebalanceDelta) -> String {
    match delta.action {
        RebalanceAction::Reduce => format!("reduce by {}", format_percent(delta.magnitude())),
        RebalanceAction::Increase => format!("increase by {}", format_percent(delta.magnitude())),
        RebalanceAction::Hold => "on target".to_string(),
    }
}

impl fmt::Display for AllocationReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let a = self.allocation;
        let b = self.breakdown;
        let rows = [
            ("Equity", a.equity_percent(), b.equity_amount),
            ("Debt", a.debt_percent(), b.debt_amount),
            ("Gold", a.gold_percent(), b.gold_amount),
            ("Other", b.other_percent, b.other_amount),
        ];
        for (label, percent, amount) in rows {
            writeln!(
                f,
                "{:<7} {:>6}  {:>18}",
                label,
                format_percent(percent),
                format_inr(amount)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Against the moderate portfolio:")?;
        writeln!(f, "  Equity: {}", advice(&self.rebalance.equity))?;
        writeln!(f, "  Debt:   {}", advice(&self.rebalance.debt))?;
        writeln!(f, "  Gold:   {}", advice(&self.rebalance.gold))
    }
}

pub struct TaxReport<'a>(pub &'a TaxResult);

impl fmt::Display for TaxReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.0;
        let deduction = match r.recommended_deduction_type {
            DeductionType::Standard => "standard",
            DeductionType::Itemized => "itemized",
        };
        writeln!(
            f,
            "Above-the-line deductions:  {}",
            format_usd(r.above_the_line_deductions)
        )?;
        writeln!(f, "Standard deduction:         {}", format_usd(r.standard_deduction))?;
        writeln!(f, "Itemized deductions:        {}", format_usd(r.itemized_deductions))?;
        writeln!(f, "Recommended deduction:      {deduction}")?;
        writeln!(f, "Taxable income:             {}", format_usd(r.taxable_income))?;
        writeln!(
            f,
            "Marginal rate:              {}",
            format_percent(r.marginal_rate * Decimal::ONE_HUNDRED)
        )?;
        writeln!(f, "Estimated tax:              {}", format_usd(r.tax_owed))?;
        writeln!(f)?;
        writeln!(
            f,
            "The marginal rate is applied to all taxable income, so this estimate is an upper bound."
        )
    }
}

pub struct GstReport<'a> {
    pub result: &'a GstResult,
    pub registration: RegistrationType,
}

impl fmt::Display for GstReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Base amount:   {}", format_inr(self.result.base_amount))?;
        match self.result.components(self.registration) {
            GstComponents::Split { cgst, sgst } => {
                writeln!(f, "CGST:          {}", format_inr(cgst))?;
                writeln!(f, "SGST:          {}", format_inr(sgst))?;
            }
            GstComponents::Integrated { igst } => {
                writeln!(f, "IGST:          {}", format_inr(igst))?;
            }
        }
        writeln!(f, "Total tax:     {}", format_inr(self.result.total_tax))?;
        writeln!(f, "Total amount:  {}", format_inr(self.result.total_amount))
    }
}

pub struct InterestReport<'a>(pub &'a SimpleInterestResult);

impl fmt::Display for InterestReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Interest:      {}", format_inr(self.0.interest))?;
        writeln!(f, "Total amount:  {}", format_inr(self.0.total_amount))
    }
}
