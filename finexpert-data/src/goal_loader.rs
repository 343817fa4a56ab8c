//! CSV loader for goal lists.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name).
//!
//! | Column               | Required | Type    | Notes                                   |
//! |----------------------|----------|---------|-----------------------------------------|
//! | `name`               | yes      | string  |                                         |
//! | `target_amount`      | yes      | decimal | today's money when inflation adjusted   |
//! | `years`              | yes      | integer |                                         |
//! | `priority`           | no       | string  | `High`, `Medium` or `Low`; default `Medium` |
//! | `inflation_adjusted` | no       | bool    | default `true`                          |
//! | `completed`          | no       | bool    | default `false`                         |
//!
//! ### Example
//!
//! ```csv
//! name,target_amount,years,priority,inflation_adjusted,completed
//! Retirement,5000000,30,High,true,false
//! Car,800000,4,Low,false,
//! ```

use finexpert_core::calculations::{GoalAssumptions, GoalPlanner};
use finexpert_core::{GoalPriority, NewGoal};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    target_amount: Decimal,
    years: u32,
    priority: Option<String>,
    inflation_adjusted: Option<bool>,
    completed: Option<bool>,
}

/// One goal from the file, with its completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRecord {
    pub goal: NewGoal,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting goal CSV data.
#[derive(Debug, thiserror::Error)]
pub enum GoalLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `priority` cell held something other than `High`, `Medium` or
    /// `Low`. `row` is 1-based (header = row 0).
    #[error("unrecognised priority '{priority}' on row {row}")]
    InvalidPriority { priority: String, row: usize },

    #[error("goal on row {row} has no name")]
    MissingName { row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<GoalRecord, GoalLoadError> {
    if row.name.is_empty() {
        return Err(GoalLoadError::MissingName { row: row_number });
    }

    let priority = match row.priority.as_deref() {
        None | Some("") => GoalPriority::default(),
        Some(value) => {
            GoalPriority::parse(value).ok_or_else(|| GoalLoadError::InvalidPriority {
                priority: value.to_string(),
                row: row_number,
            })?
        }
    };

    Ok(GoalRecord {
        goal: NewGoal {
            name: row.name,
            target_amount: row.target_amount,
            years: row.years,
            priority,
            inflation_adjusted: row.inflation_adjusted.unwrap_or(true),
        },
        completed: row.completed.unwrap_or(false),
    })
}

/// Parse CSV text and return the goals in file order.
///
/// # Errors
///
/// * [`GoalLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`GoalLoadError::InvalidPriority`] / [`GoalLoadError::MissingName`]
///   for a row that parses but does not describe a valid goal.
pub fn load_goals(input: &str) -> Result<Vec<GoalRecord>, GoalLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Builds a planner holding every goal in `input`, with completed goals
/// already marked.
pub fn load_planner(
    input: &str,
    assumptions: GoalAssumptions,
) -> Result<GoalPlanner, GoalLoadError> {
    let mut planner = GoalPlanner::new(assumptions);
    for record in load_goals(input)? {
        let id = planner.add_goal(record.goal);
        if record.completed {
            planner.toggle_completed(id);
        }
    }
    Ok(planner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
