//! Income/spending totals over a parsed statement.

use ledgerlens_core::Transaction;
use serde::{Deserialize, Serialize};

/// Derived totals; recompute with `summarize` rather than storing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of amounts > 0
    pub total_income: f64,
    /// Sum of amounts <= 0; never positive
    pub total_spending: f64,
    pub transaction_count: usize,
}

impl Summary {
    /// Income plus (negative) spending
    pub fn net(&self) -> f64 {
        self.total_income + self.total_spending
    }
}

/// Single pass over `txns`. Zero amounts count as spending.
pub fn summarize(txns: &[Transaction]) -> Summary {
    txns.iter().fold(Summary::default(), |mut acc, t| {
        if t.is_spending() {
            acc.total_spending += t.amount;
        } else {
            acc.total_income += t.amount;
        }
        acc.transaction_count += 1;
        acc
    })
}
