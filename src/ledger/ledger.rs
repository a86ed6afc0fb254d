use serde::{Deserialize, Serialize};

use crate::currency::sum_amounts;

use super::{
    category::{Category, INCOME_COLOR, UNCATEGORIZED_COLOR},
    income::IncomeSource,
    transaction::{Transaction, TransactionKind},
};

/// In-memory budgeting state: the three collections plus the cached income figure.
///
/// Mutations go through `LedgerStore` so the cache and persisted blobs stay in step; the
/// accessors here never validate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub incomes: Vec<IncomeSource>,
    #[serde(default)]
    income: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from raw collections, deriving the income cache from `incomes`.
    pub fn from_parts(
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
        incomes: Vec<IncomeSource>,
    ) -> Self {
        let mut ledger = Self {
            categories,
            transactions,
            incomes,
            income: 0.0,
        };
        ledger.recompute_income();
        ledger
    }

    /// Cached monthly income.
    pub fn income(&self) -> f64 {
        self.income
    }

    /// Σ of income-source amounts, ignoring the cache.
    pub fn income_from_sources(&self) -> f64 {
        sum_amounts(self.incomes.iter().map(|source| source.amount))
    }

    /// Refreshes the cache from the sources and returns the new figure.
    pub fn recompute_income(&mut self) -> f64 {
        self.income = self.income_from_sources();
        self.income
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn income_source(&self, id: &str) -> Option<&IncomeSource> {
        self.incomes.iter().find(|source| source.id == id)
    }

    pub fn income_source_mut(&mut self, id: &str) -> Option<&mut IncomeSource> {
        self.incomes.iter_mut().find(|source| source.id == id)
    }

    pub fn add_category(&mut self, category: Category) -> String {
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> String {
        let id = transaction.id.clone();
        self.transactions.push(transaction);
        id
    }

    /// Appends an income source and refreshes the cache.
    pub fn add_income_source(&mut self, source: IncomeSource) -> String {
        let id = source.id.clone();
        self.incomes.push(source);
        self.recompute_income();
        id
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    /// Removes an income source and refreshes the cache.
    pub fn remove_income_source(&mut self, id: &str) -> Option<IncomeSource> {
        let index = self.incomes.iter().position(|source| source.id == id)?;
        let removed = self.incomes.remove(index);
        self.recompute_income();
        Some(removed)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Hex swatch shown next to a transaction of this kind. A category that no longer exists
    /// gets the uncategorized swatch.
    pub fn swatch(&self, kind: &TransactionKind) -> &str {
        match kind {
            TransactionKind::Income => INCOME_COLOR,
            TransactionKind::Uncategorized => UNCATEGORIZED_COLOR,
            TransactionKind::Category(id) => self
                .category(id)
                .map_or(UNCATEGORIZED_COLOR, |category| category.color.as_str()),
        }
    }

    /// Display name for the kind: the category name, "Income" or "Uncategorized".
    pub fn kind_label(&self, kind: &TransactionKind) -> &str {
        match kind {
            TransactionKind::Income => "Income",
            TransactionKind::Uncategorized => "Uncategorized",
            TransactionKind::Category(id) => self
                .category(id)
                .map_or("Uncategorized", |category| category.name.as_str()),
        }
    }
}
