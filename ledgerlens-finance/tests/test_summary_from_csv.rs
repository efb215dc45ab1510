use ledgerlens_finance::{category_breakdown, statement_period, summarize};
use ledgerlens_ingest::parse_transactions;

const STATEMENT: &str = "Date,Description,Amount,Category,Notes
2024-07-02,UPI-ZOMATO,-450,Food,UPI food delivery payment
2024-07-05,SALARY CREDIT,55000,Salary,Monthly salary
2024-07-08,ATM CASH WITHDRAWAL,notanumber,ATM,Cash withdrawal
2024-07-09,CHARGE REVERSAL,0,Fees,
2024-07-15,HOME LOAN EMI,-18500,EMI,Auto debit
2024-07-20,SIP MUTUAL FUND,-5000,Investment,
2024-07-28,INTEREST CREDIT,212.40,Other,Savings interest";

/// Parse → summarize over a realistic statement, including a dropped row and a zero amount.
#[test]
fn test_summary_over_parsed_statement() {
    let txns = parse_transactions(STATEMENT).unwrap();
    assert_eq!(txns.len(), 6);

    let s = summarize(&txns);
    assert_eq!(s.transaction_count, 6);
    assert!((s.total_income - 55212.40).abs() < 1e-9);
    assert_eq!(s.total_spending, -450.0 - 18500.0 - 5000.0);
}

#[test]
fn test_breakdown_and_period_over_parsed_statement() {
    let txns = parse_transactions(STATEMENT).unwrap();

    let b = category_breakdown(&txns);
    assert_eq!(b[0].category, "Salary");
    assert_eq!(b[1].category, "EMI");
    // Zero-amount row still shows up with its count
    let fees = b.iter().find(|c| c.category == "Fees").unwrap();
    assert_eq!(fees.transaction_count, 1);
    assert!(b.iter().all(|c| c.category != "ATM"));

    let (from, to) = statement_period(&txns).unwrap();
    assert_eq!(from.to_string(), "2024-07-02");
    assert_eq!(to.to_string(), "2024-07-28");
}
