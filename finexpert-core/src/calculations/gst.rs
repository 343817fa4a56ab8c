//! Goods and Services Tax (GST) on a single amount.
//!
//! In exclusive mode the tax is added to the amount. In inclusive mode the
//! amount already contains the tax and the base is backed out of it. The
//! result always carries the central/state split and the integrated
//! figure; [`GstResult::components`] picks the one a given registration
//! shows.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationError;
use crate::calculations::common::{checked_mul, ensure_non_negative, percent_to_rate};
use crate::models::{GstMode, RegistrationType};

/// Published GST slabs in percent.
pub const GST_RATES: [Decimal; 7] = [
    dec!(0),
    dec!(0.25),
    dec!(3),
    dec!(5),
    dec!(12),
    dec!(18),
    dec!(28),
];

/// Result of [`calculate_gst`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstResult {
    /// Amount before tax.
    pub base_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    /// Equal to `cgst + sgst`.
    pub igst: Decimal,
    pub total_amount: Decimal,
    pub total_tax: Decimal,
}

/// The tax lines shown on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstComponents {
    Split { cgst: Decimal, sgst: Decimal },
    Integrated { igst: Decimal },
}

impl GstResult {
    pub fn components(
        &self,
        registration: RegistrationType,
    ) -> GstComponents {
        match registration {
            RegistrationType::Regular => GstComponents::Split {
                cgst: self.cgst,
                sgst: self.sgst,
            },
            RegistrationType::Composition => GstComponents::Integrated { igst: self.igst },
        }
    }
}

/// Computes GST at one of the [`GST_RATES`].
///
/// # Errors
///
/// Returns [`CalculationError::UnsupportedGstRate`] for any other rate and
/// [`CalculationError::NegativeAmount`] for a negative amount.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finexpert_core::GstMode;
/// use finexpert_core::calculations::calculate_gst;
///
/// let result = calculate_gst(dec!(1180), dec!(18), GstMode::Inclusive).unwrap();
///
/// assert_eq!(result.base_amount, dec!(1000));
/// assert_eq!(result.total_tax, dec!(180));
/// assert_eq!(result.total_amount, dec!(1180));
/// ```
pub fn calculate_gst(
    amount: Decimal,
    rate_percent: Decimal,
    mode: GstMode,
) -> Result<GstResult, CalculationError> {
    if !GST_RATES.contains(&rate_percent) {
        return Err(CalculationError::UnsupportedGstRate(rate_percent));
    }
    ensure_non_negative("amount", amount)?;

    let rate = percent_to_rate(rate_percent);
    let (base_amount, total_amount) = match mode {
        GstMode::Exclusive => (amount, checked_mul(amount, Decimal::ONE + rate, 1)?),
        GstMode::Inclusive => (amount / (Decimal::ONE + rate), amount),
    };
    let total_tax = base_amount * rate;
    let half = total_tax / dec!(2);

    Ok(GstResult {
        base_amount,
        cgst: half,
        sgst: half,
        igst: total_tax,
        total_amount,
        total_tax,
    })
}
