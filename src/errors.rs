use std::fmt;

use thiserror::Error;

use crate::currency::format_currency;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} `{id}` not found")]
    NotFound { entity: Entity, id: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Rejections raised by mutation gating. Every variant is recoverable and carries a message
/// suitable for display next to the control that triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Enter a {0}.")]
    MissingField(Field),
    #[error("Enter a positive {0}.")]
    NonPositiveAmount(Field),
    #[error("Please set your monthly income first.")]
    IncomeNotSet,
    #[error("Total budget exceeds your monthly income of {}.", money(.income))]
    BudgetExceedsIncome { income: f64 },
    #[error("`{0}` is not a valid date (expected YYYY-MM-DD).")]
    InvalidDate(String),
    #[error("Category `{0}` does not exist.")]
    UnknownCategory(String),
}

/// Input fields named by validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CategoryName,
    Budget,
    TransactionName,
    Amount,
    Date,
    IncomeName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::CategoryName => "category",
            Field::Budget => "budget",
            Field::TransactionName => "transaction name",
            Field::Amount => "amount",
            Field::Date => "date",
            Field::IncomeName => "income name",
        };
        f.write_str(label)
    }
}

/// Entities addressed by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Transaction,
    IncomeSource,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Entity::Category => "Category",
            Entity::Transaction => "Transaction",
            Entity::IncomeSource => "Income source",
        };
        f.write_str(label)
    }
}

/// Problems found while reading persisted state. These never abort a load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistenceError {
    #[error("stored `{key}` could not be parsed ({reason}); reset to empty")]
    CorruptData { key: String, reason: String },
    #[error("cached income {cached} disagreed with income sources ({actual}); recomputed")]
    StaleIncomeCache { cached: f64, actual: f64 },
}

fn money(amount: &f64) -> String {
    format_currency(*amount, "$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_message_includes_grouped_income() {
        let err = ValidationError::BudgetExceedsIncome { income: 12500.0 };
        assert_eq!(
            err.to_string(),
            "Total budget exceeds your monthly income of $12,500."
        );
    }

    #[test]
    fn validation_errors_convert_into_ledger_errors() {
        let err: LedgerError = ValidationError::IncomeNotSet.into();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::IncomeNotSet)
        ));
        assert_eq!(err.to_string(), "Please set your monthly income first.");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = LedgerError::not_found(Entity::IncomeSource, "abc");
        assert_eq!(err.to_string(), "Income source `abc` not found");
    }
}
