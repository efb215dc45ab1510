use chrono::NaiveDate;
use ledgerlens_core::Transaction;

/// Earliest and latest YYYY-MM-DD dates in the statement.
///
/// Rows whose date does not parse are ignored here; they stay in the statement.
pub fn statement_period(txns: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = txns
        .iter()
        .filter_map(|t| NaiveDate::parse_from_str(t.date.trim(), "%Y-%m-%d").ok());

    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
