use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub filing_status: FilingStatus,
    pub min_income: Decimal,
    /// `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
    /// Marginal rate as a fraction (e.g. `0.22`).
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Whether `income` falls in `(min_income, max_income]`.
    pub fn contains(&self, income: Decimal) -> bool {
        income > self.min_income && self.max_income.is_none_or(|max| income <= max)
    }
}
