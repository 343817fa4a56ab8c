use rust_decimal::Decimal;
use thiserror::Error;

/// Errors shared by every calculator.
///
/// These are precondition violations: inputs outside the documented domain
/// of a calculator. Degenerate but legal inputs (zero months, a zero rate,
/// a zero-year horizon) never produce an error; they resolve to a defined
/// fallback value instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A currency amount was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A percentage rate was negative where the calculator does not define
    /// a meaning for it.
    #[error("{field} must be a non-negative rate, got {value}%")]
    NegativeRate { field: &'static str, value: Decimal },

    /// A portfolio share was outside 0..=100.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: Decimal },

    /// The GST rate is not one of the published slabs.
    #[error("unsupported GST rate {0}%")]
    UnsupportedGstRate(Decimal),

    /// The yearly PPF deposit is outside the statutory limits.
    #[error("PPF yearly investment must be between {min} and {max}, got {value}")]
    PpfContributionOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// Retirement must lie strictly in the future.
    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    InvalidRetirementAge {
        current_age: u32,
        retirement_age: u32,
    },

    /// A result grew too large to represent. `periods` is the compounding
    /// horizon being evaluated, or 1 for single-period arithmetic.
    #[error("result too large to represent over {periods} periods")]
    Overflow { periods: u32 },
}
