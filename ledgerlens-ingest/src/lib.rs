//! ledgerlens-ingest: turning model output into transactions, and statement files in and out.

pub mod csv_parser;
pub mod export;
pub mod fences;
pub mod statement;

pub use csv_parser::parse_transactions;
pub use export::{export_csv, export_filename, ExportNaming};
pub use fences::strip_code_fences;
pub use statement::{base_name_of, StatementFile};
