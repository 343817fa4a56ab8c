//! Financial calculators.
//!
//! Every calculator is a pure function of its inputs. Amounts and rates are
//! [`rust_decimal::Decimal`]; rates are passed as percentages (`7.1` for
//! 7.1%) and converted internally.

pub mod affordability;
pub mod allocation;
pub mod common;
pub mod emi;
pub mod error;
pub mod goals;
pub mod gst;
pub mod lumpsum;
pub mod ppf;
pub mod retirement;
pub mod simple_interest;
pub mod sip;
pub mod tax;

pub use affordability::{
    AffordabilityAssessment, AffordabilityInput, AffordabilityResult,
    EMI_AFFORDABILITY_THRESHOLD, NEEDS_MORE_INFO_MESSAGE, analyze_purchase,
};
pub use allocation::{
    Allocation, AllocationBreakdown, AllocationPreset, RebalanceAction, RebalanceDelta,
    RebalanceReport, rebalance,
};
pub use emi::calculate_emi;
pub use error::CalculationError;
pub use goals::{
    GoalAssumptions, GoalPlan, GoalPlanner, GoalProjection, project_goal, real_rate_of_return,
};
pub use gst::{GST_RATES, GstComponents, GstResult, calculate_gst};
pub use lumpsum::{LumpsumResult, LumpsumYear, calculate_lumpsum};
pub use ppf::{PPF_MAX_CONTRIBUTION, PPF_MIN_CONTRIBUTION, PpfResult, PpfYear, calculate_ppf};
pub use retirement::{
    CORPUS_MULTIPLIER, LIFE_EXPECTANCY_AGE, RetirementInput, RetirementPlan,
    calculate_retirement,
};
pub use simple_interest::{SimpleInterestResult, calculate_simple_interest};
pub use sip::{SipResult, calculate_sip};
pub use tax::{
    DeductionType, MEDICAL_EXPENSE_AGI_FLOOR, STATE_LOCAL_TAX_CAP, STUDENT_LOAN_INTEREST_CAP,
    TaxCalculator, TaxCalculatorError, TaxInput, TaxResult,
};
