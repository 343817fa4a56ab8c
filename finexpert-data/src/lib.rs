//! CSV loaders for tax tables and goal lists.

mod goal_loader;
mod tax_table_loader;

pub use goal_loader::{GoalLoadError, GoalRecord, load_goals, load_planner};
pub use tax_table_loader::{
    StandardDeductionRecord, TaxBracketRecord, TaxTableLoader, TaxTableLoaderError,
};
