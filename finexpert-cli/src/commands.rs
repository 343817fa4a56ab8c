//! Runs one subcommand and renders its report.

use anyhow::{Context, Result};
use finexpert_core::calculations::{
    AffordabilityInput, Allocation, AllocationPreset, GoalAssumptions, GoalPlanner,
    RetirementInput, TaxCalculator, TaxInput, analyze_purchase, calculate_emi, calculate_gst,
    calculate_lumpsum, calculate_ppf, calculate_retirement, calculate_simple_interest,
    calculate_sip, rebalance,
};
use finexpert_core::calculations::common::checked_mul;
use finexpert_core::{GoalPriority, NewGoal};
use finexpert_data::load_planner;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cli::{
    AffordArgs, AllocationArgs, Command, EmiArgs, GoalsArgs, GstArgs, InterestArgs, LumpsumArgs,
    PpfArgs, RetirementArgs, SipArgs, TaxArgs, given,
};
use crate::config::Config;
use crate::report::{
    AffordabilityReport, AllocationReport, EmiReport, GoalsReport, GstReport, InterestReport,
    LumpsumReport, PpfReport, RetirementReport, SipReport, TaxReport,
};

/// Executes `command` and returns the text to print.
pub fn run(
    command: &Command,
    config: &Config,
) -> Result<String> {
    match command {
        Command::Emi(args) => emi(args),
        Command::Afford(args) => afford(args),
        Command::Sip(args) => sip(args),
        Command::Lumpsum(args) => lumpsum(args),
        Command::Ppf(args) => ppf(args),
        Command::Retirement(args) => retirement(args),
        Command::Goals(args) => goals(args),
        Command::Allocation(args) => allocation(args),
        Command::Tax(args) => tax(args, config),
        Command::Gst(args) => gst(args),
        Command::Interest(args) => interest(args),
    }
}

fn emi(args: &EmiArgs) -> Result<String> {
    debug!(principal = %args.principal, rate = %args.rate, months = args.months, "emi");
    let emi = calculate_emi(args.principal, args.rate, args.months)?;
    // Zero months is reported as a single payment of the principal.
    let payments = Decimal::from(args.months.max(1));
    let total_payment = checked_mul(emi, payments, args.months)?;
    Ok(EmiReport {
        principal: args.principal,
        emi,
        total_payment,
    }
    .to_string())
}

fn afford(args: &AffordArgs) -> Result<String> {
    let input = AffordabilityInput {
        income: given(args.income),
        expenses: given(args.expenses),
        item_price: given(args.price),
        annual_rate_percent: given(args.rate),
        duration_months: args.months,
    };
    let result = analyze_purchase(&input)?;
    Ok(AffordabilityReport(&result).to_string())
}

fn sip(args: &SipArgs) -> Result<String> {
    let result = calculate_sip(args.monthly, args.rate, args.years)?;
    Ok(SipReport(&result).to_string())
}

fn lumpsum(args: &LumpsumArgs) -> Result<String> {
    let result = calculate_lumpsum(args.principal, args.rate, args.years)?;
    Ok(LumpsumReport {
        result: &result,
        breakdown: args.breakdown,
    }
    .to_string())
}

fn ppf(args: &PpfArgs) -> Result<String> {
    let result = calculate_ppf(args.yearly, args.rate, args.years)?;
    Ok(PpfReport {
        result: &result,
        breakdown: args.breakdown,
    }
    .to_string())
}

fn retirement(args: &RetirementArgs) -> Result<String> {
    let plan = calculate_retirement(&RetirementInput {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        monthly_expenses: args.monthly_expenses,
        inflation_percent: args.inflation,
        current_savings: args.savings,
        expected_return_percent: args.expected_return,
    })?;
    Ok(RetirementReport(&plan).to_string())
}

/// Planner used when no goals file is given.
fn default_planner(assumptions: GoalAssumptions) -> GoalPlanner {
    let mut planner = GoalPlanner::new(assumptions);
    planner.add_goal(NewGoal {
        name: "Retirement".to_string(),
        target_amount: Decimal::from(5_000_000),
        years: 30,
        priority: GoalPriority::High,
        inflation_adjusted: true,
    });
    planner
}

fn goals(args: &GoalsArgs) -> Result<String> {
    let assumptions = GoalAssumptions {
        expected_return_percent: args.expected_return,
        inflation_percent: args.inflation,
    };

    let planner = match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read goals file '{}'", path.display()))?;
            let planner = load_planner(&text, assumptions)
                .with_context(|| format!("in goals file '{}'", path.display()))?;
            info!(path = %path.display(), count = planner.goals().len(), "loaded goals");
            planner
        }
        None => default_planner(assumptions),
    };

    let plan = planner.plan()?;
    Ok(GoalsReport(&plan).to_string())
}

fn allocation(args: &AllocationArgs) -> Result<String> {
    let allocation = match args.preset {
        Some(preset) => AllocationPreset::from(preset).allocation(),
        None => Allocation::new(args.equity, args.debt, args.gold)?,
    };
    let breakdown = allocation.breakdown(args.total)?;
    let report = rebalance(&allocation);
    Ok(AllocationReport {
        allocation: &allocation,
        breakdown: &breakdown,
        rebalance: &report,
    }
    .to_string())
}

fn tax(
    args: &TaxArgs,
    config: &Config,
) -> Result<String> {
    let mut config = config.clone();
    if let Some(path) = &args.brackets {
        config.tax.brackets = Some(path.clone());
    }
    if let Some(path) = &args.standard_deductions {
        config.tax.standard_deductions = Some(path.clone());
    }
    let table = config.tax_table()?;

    let input = TaxInput {
        filing_status: args.status.into(),
        gross_income: args.income,
        student_loan_interest: args.student_loan_interest,
        ira_contributions: args.ira_contributions,
        educator_expenses: args.educator_expenses,
        state_local_taxes: args.state_local_taxes,
        mortgage_interest: args.mortgage_interest,
        charitable_contributions: args.charitable_contributions,
        medical_expenses: args.medical_expenses,
    };
    let result = TaxCalculator::new(&table).calculate(&input)?;
    Ok(TaxReport(&result).to_string())
}

fn gst(args: &GstArgs) -> Result<String> {
    let result = calculate_gst(args.amount, args.rate, args.mode.into())?;
    Ok(GstReport {
        result: &result,
        registration: args.registration.into(),
    }
    .to_string())
}

fn interest(args: &InterestArgs) -> Result<String> {
    let result = calculate_simple_interest(args.principal, args.rate, args.years)?;
    Ok(InterestReport(&result).to_string())
}
