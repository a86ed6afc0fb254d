//! Gating rules applied before any ledger mutation is committed.

use chrono::NaiveDate;

use crate::currency::{is_positive, sum_amounts};
use crate::errors::{Field, ValidationError};
use crate::ledger::{Ledger, TransactionKind};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks a category add or update.
///
/// `replacing` is the id of the category whose budget the new value supersedes (the upsert
/// target on add, the edited category on edit) so its current budget is not counted twice.
pub fn check_category(
    ledger: &Ledger,
    name: &str,
    budget: f64,
    replacing: Option<&str>,
) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::CategoryName));
    }
    check_budget_ceiling(ledger, budget, replacing)
}

/// Ceiling check: other categories' budgets plus `budget` must fit within income.
pub fn check_budget_ceiling(
    ledger: &Ledger,
    budget: f64,
    replacing: Option<&str>,
) -> ValidationResult<()> {
    if !is_positive(budget) {
        return Err(ValidationError::NonPositiveAmount(Field::Budget));
    }
    let income = ledger.income();
    if !is_positive(income) {
        return Err(ValidationError::IncomeNotSet);
    }
    let others = sum_amounts(
        ledger
            .categories
            .iter()
            .filter(|category| Some(category.id.as_str()) != replacing)
            .map(|category| category.budget),
    );
    if others + budget > income {
        return Err(ValidationError::BudgetExceedsIncome { income });
    }
    Ok(())
}

/// Checks a new transaction and returns its parsed date.
pub fn check_transaction(
    ledger: &Ledger,
    name: &str,
    amount: f64,
    date: &str,
    kind: &TransactionKind,
) -> ValidationResult<NaiveDate> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::TransactionName));
    }
    if !is_positive(amount) {
        return Err(ValidationError::NonPositiveAmount(Field::Amount));
    }
    let date = parse_date(date)?;
    check_kind(ledger, kind)?;
    Ok(date)
}

/// A category reference must point at an existing category.
pub fn check_kind(ledger: &Ledger, kind: &TransactionKind) -> ValidationResult<()> {
    match kind.category_id() {
        Some(id) if ledger.category(id).is_none() => {
            Err(ValidationError::UnknownCategory(id.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn check_income_source(name: &str, amount: f64) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::IncomeName));
    }
    if !is_positive(amount) {
        return Err(ValidationError::NonPositiveAmount(Field::Amount));
    }
    Ok(())
}

fn parse_date(raw: &str) -> ValidationResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(Field::Date));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}
