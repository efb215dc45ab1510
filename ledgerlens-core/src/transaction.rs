//! Transaction records produced by the CSV parser

use serde::{Deserialize, Serialize};

/// Category used when the model left the cell empty
pub const DEFAULT_CATEGORY: &str = "Other";

/// One financial movement read from the extracted statement CSV
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Expected as YYYY-MM-DD; kept verbatim
    pub date: String,
    pub description: String,
    /// Negative = debit/expense, positive = credit/income
    pub amount: f64,
    /// Free-form label; see `KnownCategory` for the usual values
    pub category: String,
    pub notes: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            category: category.into(),
            notes: notes.into(),
        }
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Returns true if this counts as spending. Zero amounts land here.
    pub fn is_spending(&self) -> bool {
        !self.is_income()
    }
}
