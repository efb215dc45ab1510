//! ledgerlens-finance: income/spending summary, category breakdown, statement period

pub mod breakdown;
pub mod period;
pub mod summary;

pub use breakdown::{category_breakdown, CategoryTotal};
pub use period::statement_period;
pub use summary::{summarize, Summary};
