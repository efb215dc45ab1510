//! ledgerlens-core: transaction types and the error taxonomy shared by every crate.

pub mod category;
pub mod error;
pub mod transaction;

pub use category::KnownCategory;
pub use error::{Error, Result};
pub use transaction::Transaction;
