pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, TaxCalculatorError};
pub use models::*;
