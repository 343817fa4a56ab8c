mod filing_status;
mod goal;
mod gst;
mod standard_deduction;
mod tax_bracket;
mod tax_table;

pub use filing_status::FilingStatus;
pub use goal::{Goal, GoalPriority, NewGoal};
pub use gst::{GstMode, RegistrationType};
pub use standard_deduction::StandardDeduction;
pub use tax_bracket::TaxBracket;
pub use tax_table::TaxTable;
