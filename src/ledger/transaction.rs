use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::lenient_amount;

use super::{month::YearMonth, new_id};

/// Wire value marking a transaction as a deposit rather than spend.
pub const INCOME_MARKER: &str = "income";

/// How a transaction counts toward the month's figures.
///
/// Persisted as the `categoryId` field: `null` for [`Uncategorized`](Self::Uncategorized),
/// `"income"` for [`Income`](Self::Income), otherwise the category id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TransactionKind {
    #[default]
    Uncategorized,
    Income,
    Category(String),
}

impl TransactionKind {
    pub fn category(id: impl Into<String>) -> Self {
        TransactionKind::Category(id.into())
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            TransactionKind::Category(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionKind::Income)
    }
}

impl From<Option<String>> for TransactionKind {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => TransactionKind::Uncategorized,
            Some(id) if id.is_empty() => TransactionKind::Uncategorized,
            Some(id) if id == INCOME_MARKER => TransactionKind::Income,
            Some(id) => TransactionKind::Category(id),
        }
    }
}

impl From<TransactionKind> for Option<String> {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Uncategorized => None,
            TransactionKind::Income => Some(INCOME_MARKER.to_string()),
            TransactionKind::Category(id) => Some(id),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Uncategorized => f.write_str("Uncategorized"),
            TransactionKind::Income => f.write_str("Income (Deposit)"),
            TransactionKind::Category(id) => write!(f, "Category {id}"),
        }
    }
}

/// A dated spend or deposit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "categoryId", default)]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(name: impl Into<String>, amount: f64, date: NaiveDate, kind: TransactionKind) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            amount,
            date,
            kind,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}
