use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Longest accepted expense description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;
/// Smallest accepted expense amount.
pub const MIN_EXPENSE_AMOUNT: f64 = 0.01;

/// Type-safe identifier for expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpenseId(pub u32);

impl From<u32> for ExpenseId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expense_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    #[default]
    General,
    Transport,
    Marketing,
    Packaging,
    Fees,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::General,
        ExpenseCategory::Transport,
        ExpenseCategory::Marketing,
        ExpenseCategory::Packaging,
        ExpenseCategory::Fees,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::General => "general",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Packaging => "packaging",
            ExpenseCategory::Fees => "fees",
            ExpenseCategory::Other => "other",
        }
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown expense category: {0}")]
pub struct UnknownExpenseCategory(pub String);

impl FromStr for ExpenseCategory {
    type Err = UnknownExpenseCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownExpenseCategory(s.to_string()))
    }
}

/// An operating cost (transport, packaging, fees...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub category: ExpenseCategory,
}

/// Payload for logging an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub description: String,
    pub amount: f64,
    /// Defaults to today (local time).
    pub expense_date: Option<NaiveDate>,
    pub category: ExpenseCategory,
}

/// Partial update of an expense. `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub expense_date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_category_parse() {
        assert_eq!("FEES".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Fees);
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::General);
        assert!("rent".parse::<ExpenseCategory>().is_err());
    }
}
