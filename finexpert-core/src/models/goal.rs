use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A savings goal tracked by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub name: String,
    /// Target in today's money when `inflation_adjusted`, otherwise the
    /// nominal amount needed at the deadline.
    pub target_amount: Decimal,
    pub years: u32,
    pub priority: GoalPriority,
    pub inflation_adjusted: bool,
    pub completed: bool,
}

/// For adding goals to a planner (no id, never completed on creation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub years: u32,
    pub priority: GoalPriority,
    pub inflation_adjusted: bool,
}
