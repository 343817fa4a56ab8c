use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use finexpert_core::calculations::AllocationPreset;
use finexpert_core::{FilingStatus, GstMode, RegistrationType};
use rust_decimal::Decimal;

use crate::utils::{ParseDecimalError, parse_decimal, parse_optional_decimal};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal finance calculators.
///
/// Amounts accept comma separators (`12,34,567` or `1,234,567`); rates are
/// annual percentages (`7.1` for 7.1%).
#[derive(Debug, Parser)]
#[command(name = "finexpert", version)]
pub struct Cli {
    /// Configuration file [default: ./finexpert.toml if present].
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `finexpert_core=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monthly installment for a loan.
    Emi(EmiArgs),
    /// Whether a purchase on EMI fits the budget.
    Afford(AffordArgs),
    /// Future value of a monthly SIP.
    Sip(SipArgs),
    /// Growth of a one-time investment.
    Lumpsum(LumpsumArgs),
    /// Public Provident Fund maturity.
    Ppf(PpfArgs),
    /// Retirement corpus and required SIP.
    Retirement(RetirementArgs),
    /// Monthly investment for a list of goals.
    Goals(GoalsArgs),
    /// Portfolio split and rebalancing advice.
    Allocation(AllocationArgs),
    /// US federal income tax estimate.
    Tax(TaxArgs),
    /// GST on an amount.
    Gst(GstArgs),
    /// Simple interest.
    Interest(InterestArgs),
}

#[derive(Debug, Args)]
pub struct EmiArgs {
    /// Loan amount.
    #[arg(long, value_parser = parse_decimal)]
    pub principal: Decimal,

    /// Annual interest rate in percent.
    #[arg(long, value_parser = parse_decimal)]
    pub rate: Decimal,

    /// Tenure in months.
    #[arg(long)]
    pub months: u32,
}

/// An amount flag that may be passed blank (`--income ""`). Blank counts
/// as not given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalAmount(pub Option<Decimal>);

fn parse_optional_amount(s: &str) -> Result<OptionalAmount, ParseDecimalError> {
    parse_optional_decimal(s).map(OptionalAmount)
}

/// Value of an optional amount flag, treating a blank value like an
/// absent flag.
pub fn given(value: Option<OptionalAmount>) -> Option<Decimal> {
    value.and_then(|amount| amount.0)
}

/// Every field is optional; missing or blank ones produce a prompt instead
/// of an assessment.
#[derive(Debug, Args)]
pub struct AffordArgs {
    /// Monthly income.
    #[arg(long, value_parser = parse_optional_amount)]
    pub income: Option<OptionalAmount>,

    /// Monthly expenses.
    #[arg(long, value_parser = parse_optional_amount)]
    pub expenses: Option<OptionalAmount>,

    /// Price of the item.
    #[arg(long, value_parser = parse_optional_amount)]
    pub price: Option<OptionalAmount>,

    /// Annual interest rate in percent.
    #[arg(long, value_parser = parse_optional_amount)]
    pub rate: Option<OptionalAmount>,

    /// Loan duration in months.
    #[arg(long)]
    pub months: Option<u32>,
}

#[derive(Debug, Args)]
pub struct SipArgs {
    /// Monthly investment.
    #[arg(long, value_parser = parse_decimal, default_value = "1000")]
    pub monthly: Decimal,

    /// Expected annual return in percent.
    #[arg(long, value_parser = parse_decimal, default_value = "12")]
    pub rate: Decimal,

    #[arg(long, default_value_t = 10)]
    pub years: u32,
}

#[derive(Debug, Args)]
pub struct LumpsumArgs {
    #[arg(long, value_parser = parse_decimal, default_value = "100000")]
    pub principal: Decimal,

    /// Expected annual return in percent.
    #[arg(long, value_parser = parse_decimal, default_value = "12")]
    pub rate: Decimal,

    #[arg(long, default_value_t = 5)]
    pub years: u32,

    /// Print the value at the end of every year.
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Debug, Args)]
pub struct PpfArgs {
    /// Deposit per year (500 to 1,50,000).
    #[arg(long, value_parser = parse_decimal, default_value = "150000")]
    pub yearly: Decimal,

    /// Annual interest rate in percent.
    #[arg(long, value_parser = parse_decimal, default_value = "7.1")]
    pub rate: Decimal,

    #[arg(long, default_value_t = 15)]
    pub years: u32,

    /// Print the account activity for every year.
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Debug, Args)]
pub struct RetirementArgs {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,

    #[arg(long, default_value_t = 60)]
    pub retirement_age: u32,

    /// Today's monthly expenses.
    #[arg(long, value_parser = parse_decimal, default_value = "50000")]
    pub monthly_expenses: Decimal,

    /// Annual inflation in percent.
    #[arg(long, value_parser = parse_decimal, default_value = "6")]
    pub inflation: Decimal,

    /// Savings already set aside.
    #[arg(long, value_parser = parse_decimal, default_value = "1000000")]
    pub savings: Decimal,

    /// Expected annual return in percent.
    #[arg(long = "return", value_parser = parse_decimal, default_value = "8")]
    pub expected_return: Decimal,
}

#[derive(Debug, Args)]
pub struct GoalsArgs {
    /// Goals CSV (`name,target_amount,years[,priority,inflation_adjusted,completed]`).
    /// Without it a single 30-year retirement goal of 50,00,000 is planned.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Expected annual return in percent.
    #[arg(long = "return", value_parser = parse_decimal, default_value = "8")]
    pub expected_return: Decimal,

    /// Annual inflation in percent.
    #[arg(long, value_parser = parse_decimal, default_value = "6")]
    pub inflation: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<PresetArg> for AllocationPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Conservative => AllocationPreset::Conservative,
            PresetArg::Moderate => AllocationPreset::Moderate,
            PresetArg::Aggressive => AllocationPreset::Aggressive,
        }
    }
}

#[derive(Debug, Args)]
pub struct AllocationArgs {
    /// Portfolio size.
    #[arg(long, value_parser = parse_decimal, default_value = "1000000")]
    pub total: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "60")]
    pub equity: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "30")]
    pub debt: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "10")]
    pub gold: Decimal,

    /// Use a model portfolio instead of the percentages above.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilingStatusArg {
    Single,
    Married,
    #[value(name = "hoh")]
    HeadOfHousehold,
}

impl From<FilingStatusArg> for FilingStatus {
    fn from(value: FilingStatusArg) -> Self {
        match value {
            FilingStatusArg::Single => FilingStatus::Single,
            FilingStatusArg::Married => FilingStatus::Married,
            FilingStatusArg::HeadOfHousehold => FilingStatus::HeadOfHousehold,
        }
    }
}

#[derive(Debug, Args)]
pub struct TaxArgs {
    #[arg(long, value_enum, default_value = "single")]
    pub status: FilingStatusArg,

    /// Gross income.
    #[arg(long, value_parser = parse_decimal)]
    pub income: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub student_loan_interest: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub ira_contributions: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub educator_expenses: Decimal,

    /// State and local taxes paid.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub state_local_taxes: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub mortgage_interest: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub charitable_contributions: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub medical_expenses: Decimal,

    /// Brackets CSV, overriding the configuration file.
    #[arg(long)]
    pub brackets: Option<PathBuf>,

    /// Standard deductions CSV, overriding the configuration file.
    #[arg(long)]
    pub standard_deductions: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GstModeArg {
    Exclusive,
    Inclusive,
}

impl From<GstModeArg> for GstMode {
    fn from(value: GstModeArg) -> Self {
        match value {
            GstModeArg::Exclusive => GstMode::Exclusive,
            GstModeArg::Inclusive => GstMode::Inclusive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegistrationArg {
    Regular,
    Composition,
}

impl From<RegistrationArg> for RegistrationType {
    fn from(value: RegistrationArg) -> Self {
        match value {
            RegistrationArg::Regular => RegistrationType::Regular,
            RegistrationArg::Composition => RegistrationType::Composition,
        }
    }
}

#[derive(Debug, Args)]
pub struct GstArgs {
    #[arg(long, value_parser = parse_decimal)]
    pub amount: Decimal,

    /// One of 0, 0.25, 3, 5, 12, 18, 28.
    #[arg(long, value_parser = parse_decimal, default_value = "18")]
    pub rate: Decimal,

    #[arg(long, value_enum, default_value = "exclusive")]
    pub mode: GstModeArg,

    #[arg(long, value_enum, default_value = "regular")]
    pub registration: RegistrationArg,
}

#[derive(Debug, Args)]
pub struct InterestArgs {
    #[arg(long, value_parser = parse_decimal)]
    pub principal: Decimal,

    /// Annual interest rate in percent.
    #[arg(long, value_parser = parse_decimal)]
    pub rate: Decimal,

    /// Duration in years; fractions allowed.
    #[arg(long, value_parser = parse_decimal)]
    pub years: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn emi_accepts_grouped_amounts() {
        let cli = Cli::try_parse_from([
            "finexpert",
            "emi",
            "--principal",
            "5,00,000",
            "--rate",
            "10",
            "--months",
            "12",
        ])
        .unwrap();

        let Command::Emi(args) = cli.command else {
            panic!("expected emi, got {:?}", cli.command);
        };
        assert_eq!(args.principal, dec!(500000));
        assert_eq!(args.rate, dec!(10));
        assert_eq!(args.months, 12);
    }

    #[test]
    fn ppf_defaults() {
        let cli = Cli::try_parse_from(["finexpert", "ppf"]).unwrap();

        let Command::Ppf(args) = cli.command else {
            panic!("expected ppf, got {:?}", cli.command);
        };
        assert_eq!(args.yearly, dec!(150000));
        assert_eq!(args.rate, dec!(7.1));
        assert_eq!(args.years, 15);
        assert!(!args.breakdown);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["finexpert", "sip", "--log-level", "debug"]).unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn tax_status_names() {
        let cli = Cli::try_parse_from(["finexpert", "tax", "--status", "hoh", "--income", "1"])
            .unwrap();

        let Command::Tax(args) = cli.command else {
            panic!("expected tax, got {:?}", cli.command);
        };
        assert_eq!(FilingStatus::from(args.status), FilingStatus::HeadOfHousehold);
    }

    #[test]
    fn invalid_amount_is_rejected() {
        let result = Cli::try_parse_from(["finexpert", "gst", "--amount", "ten"]);

        assert!(result.is_err());
    }

    #[test]
    fn afford_fields_are_optional() {
        let cli = Cli::try_parse_from(["finexpert", "afford", "--income", "80000"]).unwrap();

        let Command::Afford(args) = cli.command else {
            panic!("expected afford, got {:?}", cli.command);
        };
        assert_eq!(given(args.income), Some(dec!(80000)));
        assert_eq!(given(args.expenses), None);
        assert_eq!(args.months, None);
    }

    #[test]
    fn blank_afford_amount_counts_as_missing() {
        let cli = Cli::try_parse_from(["finexpert", "afford", "--income", ""]).unwrap();

        let Command::Afford(args) = cli.command else {
            panic!("expected afford, got {:?}", cli.command);
        };
        assert_eq!(args.income, Some(OptionalAmount(None)));
        assert_eq!(given(args.income), None);
    }
}
