//! Plain-text rendering of the summary, category breakdown and transaction table.

use chrono::NaiveDate;
use ledgerlens_core::{KnownCategory, Transaction};
use ledgerlens_finance::{category_breakdown, statement_period, CategoryTotal, Summary};

const EMPTY_TABLE: &str = "No transactions to display.\n";

/// Full report for one extraction. With no rows, only the empty-table line is shown.
pub fn render_report(source_name: &str, txns: &[Transaction], summary: &Summary) -> String {
    if txns.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    let mut s = format!("# {source_name}\n\n");
    s.push_str(&render_summary(summary, statement_period(txns)));
    s.push('\n');
    s.push_str(&render_breakdown(&category_breakdown(txns)));
    s.push('\n');
    s.push_str("## Transaction details\n\n");
    s.push_str(&render_table(txns));
    s
}

/// `$1,234.56` of the absolute value
pub fn format_currency(amount: f64) -> String {
    format!("${}", group_thousands(amount.abs()))
}

/// `-450.00` / `+55,000.00`; zero renders with `+`
pub fn format_signed(amount: f64) -> String {
    let sign = if amount < 0.0 { '-' } else { '+' };
    format!("{sign}{}", group_thousands(amount.abs()))
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(fixed.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*d);
    }
    out.push('.');
    out.push_str(frac);
    out
}

pub fn render_summary(summary: &Summary, period: Option<(NaiveDate, NaiveDate)>) -> String {
    let mut s = String::new();
    s.push_str("## Summary\n\n");
    if let Some((from, to)) = period {
        s.push_str(&format!("Period:             {from} to {to}\n"));
    }
    s.push_str(&format!("Total Income:       {}\n", format_currency(summary.total_income)));
    s.push_str(&format!("Total Spending:     {}\n", format_currency(summary.total_spending)));
    s.push_str(&format!("Net:                {}\n", format_signed(summary.net())));
    s.push_str(&format!("Total Transactions: {}\n", summary.transaction_count));
    s
}

/// Labels outside the known category set get a trailing `*` and a footnote.
pub fn render_breakdown(totals: &[CategoryTotal]) -> String {
    let mut s = String::from("## By category\n\n");
    let mut any_unknown = false;
    let labels: Vec<String> = totals
        .iter()
        .map(|c| match KnownCategory::from_label(&c.category) {
            Some(_) => c.category.clone(),
            None => {
                any_unknown = true;
                format!("{}*", c.category)
            }
        })
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, c) in labels.iter().zip(totals) {
        s.push_str(&format!(
            "- {:<width$}  {:>14}  ({})\n",
            label,
            format_signed(c.total),
            c.transaction_count,
        ));
    }
    if any_unknown {
        s.push_str("\n* not a standard category\n");
    }
    s
}

const HEADERS: [&str; 5] = ["Date", "Description", "Amount", "Category", "Notes"];

pub fn render_table(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    let rows: Vec<[String; 5]> = txns
        .iter()
        .map(|t| {
            [
                t.date.clone(),
                t.description.clone(),
                format_signed(t.amount),
                t.category.clone(),
                t.notes.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut s = String::new();
    push_row(&mut s, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    s.push_str(rule.join("  ").trim_end());
    s.push('\n');
    for row in &rows {
        push_row(&mut s, row, &widths);
    }
    s
}

fn push_row(s: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, w))| {
            // Amount column is right-aligned
            if i == 2 {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    s.push_str(line.join("  ").trim_end());
    s.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(55000.0), "$55,000.00");
        assert_eq!(format_currency(-450.0), "$450.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(-450.0), "-450.00");
        assert_eq!(format_signed(55000.0), "+55,000.00");
        assert_eq!(format_signed(0.0), "+0.00");
    }

    #[test]
    fn test_summary_block() {
        let summary = Summary {
            total_income: 55000.0,
            total_spending: -450.0,
            transaction_count: 2,
        };
        let period = Some((
            NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
        ));
        let out = render_summary(&summary, period);
        assert!(out.contains("Period:             2024-07-02 to 2024-07-05"));
        assert!(out.contains("Total Income:       $55,000.00"));
        assert!(out.contains("Total Spending:     $450.00"));
        assert!(out.contains("Net:                +54,550.00"));
        assert!(out.contains("Total Transactions: 2"));
    }

    #[test]
    fn test_breakdown_lines() {
        let totals = vec![
            CategoryTotal {
                category: "Salary".to_string(),
                total: 55000.0,
                transaction_count: 1,
            },
            CategoryTotal {
                category: "ATM".to_string(),
                total: -2000.0,
                transaction_count: 3,
            },
        ];
        let out = render_breakdown(&totals);
        assert!(out.contains("- Salary      +55,000.00  (1)"));
        assert!(out.contains("- ATM          -2,000.00  (3)"));
        assert!(!out.contains("not a standard category"));
    }

    #[test]
    fn test_breakdown_marks_unknown_labels() {
        let totals = vec![
            CategoryTotal {
                category: "Fitness".to_string(),
                total: -900.0,
                transaction_count: 1,
            },
            CategoryTotal {
                category: "Food".to_string(),
                total: -450.0,
                transaction_count: 2,
            },
        ];
        let out = render_breakdown(&totals);
        assert!(out.contains("- Fitness*         -900.00  (1)"));
        assert!(out.contains("- Food             -450.00  (2)"));
        assert!(out.ends_with("\n* not a standard category\n"));
    }

    #[test]
    fn test_report_with_no_rows_is_only_empty_line() {
        let out = render_report("july.pdf", &[], &Summary::default());
        assert_eq!(out, "No transactions to display.\n");
    }

    #[test]
    fn test_report_sections_in_order() {
        let txns = vec![
            Transaction::new("2024-07-02", "UPI-ZOMATO", -450.0, "Food", ""),
            Transaction::new("2024-07-05", "SALARY CREDIT", 55000.0, "Salary", ""),
        ];
        let summary = ledgerlens_finance::summarize(&txns);
        let out = render_report("july.pdf", &txns, &summary);
        assert!(out.starts_with("# july.pdf\n\n## Summary\n"));
        let by_category = out.find("## By category").unwrap();
        let details = out.find("## Transaction details").unwrap();
        assert!(by_category < details);
        assert!(out.contains("Period:             2024-07-02 to 2024-07-05"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No transactions to display.\n");
    }

    #[test]
    fn test_table_layout() {
        let txns = vec![
            Transaction::new("2024-07-02", "UPI-ZOMATO", -450.0, "Food", "UPI food delivery payment"),
            Transaction::new("2024-07-05", "SALARY CREDIT", 55000.0, "Salary", ""),
        ];
        let out = render_table(&txns);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Date        Description        Amount  Category  Notes"
        );
        assert_eq!(
            lines[2],
            "2024-07-02  UPI-ZOMATO        -450.00  Food      UPI food delivery payment"
        );
        assert_eq!(lines[3], "2024-07-05  SALARY CREDIT  +55,000.00  Salary");
    }
}
