//! Per-category totals, largest movement first.

use std::collections::HashMap;

use ledgerlens_core::Transaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Signed sum of the category's amounts
    pub total: f64,
    pub transaction_count: usize,
}

/// Group by category label, sorted by |total| descending, then by name.
pub fn category_breakdown(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    for t in txns {
        let entry = groups.entry(t.category.as_str()).or_insert((0.0, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }

    let mut out: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, transaction_count))| CategoryTotal {
            category: category.to_string(),
            total,
            transaction_count,
        })
        .collect();

    out.sort_by(|a, b| {
        b.total
            .abs()
            .total_cmp(&a.total.abs())
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_sorts() {
        let txns = vec![
            Transaction::new("2024-07-02", "UPI-ZOMATO", -450.0, "Food", ""),
            Transaction::new("2024-07-03", "SWIGGY", -300.0, "Food", ""),
            Transaction::new("2024-07-05", "SALARY CREDIT", 55000.0, "Salary", ""),
            Transaction::new("2024-07-08", "ATM", -2000.0, "ATM", ""),
        ];
        let b = category_breakdown(&txns);
        let names: Vec<_> = b.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Salary", "ATM", "Food"]);

        let food = &b[2];
        assert_eq!(food.total, -750.0);
        assert_eq!(food.transaction_count, 2);
    }

    #[test]
    fn test_ties_break_by_name() {
        let txns = vec![
            Transaction::new("2024-07-02", "B", -100.0, "Shopping", ""),
            Transaction::new("2024-07-02", "A", 100.0, "Fees", ""),
        ];
        let b = category_breakdown(&txns);
        assert_eq!(b[0].category, "Fees");
        assert_eq!(b[1].category, "Shopping");
    }

    #[test]
    fn test_empty() {
        assert!(category_breakdown(&[]).is_empty());
    }
}
