pub mod json_backend;
pub mod memory;

use crate::errors::Result;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Abstraction over the local key/value store that holds serialized state.
///
/// Values are opaque strings (JSON for everything the ledger writes). Writes are
/// last-write-wins; there is no multi-key transaction.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Logical keys persisted by the ledger store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Categories,
    Transactions,
    Incomes,
    Income,
    SelectedMonth,
    Theme,
    Session,
}

impl StorageKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageKey::Categories => "saavr_v3_4_categories",
            StorageKey::Transactions => "saavr_v3_4_transactions",
            StorageKey::Incomes => "saavr_v3_4_incomes",
            StorageKey::Income => "saavr_v3_4_income",
            StorageKey::SelectedMonth => "saavr_v3_4_month",
            StorageKey::Theme => "saavr_theme",
            StorageKey::Session => "saavr_v3_4_login",
        }
    }
}
