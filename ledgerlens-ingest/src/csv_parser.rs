//! Parser for the CSV table returned by the extraction model.
//!
//! Expected shape (column order may vary, `Notes` is optional):
//!   Date,Description,Amount,Category,Notes
//!   2024-07-02,UPI-ZOMATO,-450,Food,UPI food delivery payment
//!
//! Quoting is off: a comma inside quotes still splits the field.

use csv::StringRecord;
use ledgerlens_core::transaction::DEFAULT_CATEGORY;
use ledgerlens_core::{Error, Result, Transaction};
use regex::Regex;
use tracing::debug;

const REQUIRED_HEADERS: [&str; 4] = ["Date", "Description", "Amount", "Category"];
const NOTES_HEADER: &str = "Notes";

/// Header name -> field index, built once per parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
    notes: Option<usize>,
    width: usize,
}

impl ColumnMap {
    fn from_header(record: &StringRecord) -> Result<Self> {
        let find = |name: &str| record.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_HEADERS
            .into_iter()
            .filter(|h| find(*h).is_none())
            .map(String::from)
            .collect();

        match (find("Date"), find("Description"), find("Amount"), find("Category")) {
            (Some(date), Some(description), Some(amount), Some(category)) => Ok(Self {
                date,
                description,
                amount,
                category,
                notes: find(NOTES_HEADER),
                width: record.len(),
            }),
            _ => Err(Error::MalformedInput { missing }),
        }
    }

    fn map_row(&self, record: &StringRecord, amount_re: &Regex) -> Option<Transaction> {
        if record.len() < self.width {
            return None;
        }

        let cell = |i: usize| record.get(i).unwrap_or("").trim();
        let amount = parse_amount(cell(self.amount), amount_re)?;

        let category = match cell(self.category) {
            "" => DEFAULT_CATEGORY,
            c => c,
        };
        let notes = self.notes.map(cell).unwrap_or("");

        Some(Transaction::new(
            cell(self.date),
            cell(self.description),
            amount,
            category,
            notes,
        ))
    }
}

/// Leading numeric prefix, so `-450 Dr` reads as -450 and `1200.50CR` as 1200.5.
/// `None` when the cell does not start with a number.
fn parse_amount(raw: &str, amount_re: &Regex) -> Option<f64> {
    let m = amount_re.find(raw.trim())?;
    m.as_str().parse::<f64>().ok()
}

/// Parse raw CSV text into transactions, in row order.
///
/// Header-only (or blank) input yields an empty list. Rows that are shorter than
/// the header or whose amount does not parse are dropped silently.
pub fn parse_transactions(text: &str) -> Result<Vec<Transaction>> {
    let amount_re = Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.trim().as_bytes());

    let mut records = rdr.records();
    let header = match records.next() {
        Some(h) => h?,
        None => return Ok(Vec::new()),
    };

    let mut rows = records.peekable();
    if rows.peek().is_none() {
        return Ok(Vec::new());
    }

    let columns = ColumnMap::from_header(&header)?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for result in rows {
        let record = result?;
        match columns.map_row(&record, &amount_re) {
            Some(txn) => out.push(txn),
            None => skipped += 1,
        }
    }

    debug!(parsed = out.len(), skipped, "parsed statement csv");
    Ok(out)
}
