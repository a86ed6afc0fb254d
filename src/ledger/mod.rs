//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
pub mod income;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod month;
pub mod transaction;

pub use category::{Category, Preset, INCOME_COLOR, PRESETS, UNCATEGORIZED_COLOR};
pub use income::IncomeSource;
pub use ledger::Ledger;
pub use month::{
    clamp_to_ceiling, format_long_date, max_allowed_month, year_month_of, Clock, FixedClock,
    SystemClock, YearMonth,
};
pub use transaction::{Transaction, TransactionKind, INCOME_MARKER};

/// Generates a fresh collection-unique identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
