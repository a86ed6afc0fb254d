use tracing::debug;

use crate::core::validation::{check_budget_ceiling, check_category};
use crate::errors::{Entity, Field, LedgerError, Result, ValidationError};
use crate::ledger::{category::preset_color, Category, Ledger, TransactionKind};

/// Result of an add that may have matched an existing category by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    Created(String),
    Updated(String),
}

impl Upsert {
    pub fn id(&self) -> &str {
        match self {
            Upsert::Created(id) | Upsert::Updated(id) => id,
        }
    }
}

/// Partial update for [`CategoryService::edit`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub budget: Option<f64>,
}

/// What a delete removed and how many transactions lost their category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRemoval {
    pub category: Category,
    pub detached_transactions: usize,
}

pub struct CategoryService;

impl CategoryService {
    /// Adds a category, or updates the budget and preset color of the one already using `name`.
    pub fn add(ledger: &mut Ledger, name: &str, budget: f64) -> Result<Upsert> {
        let name = name.trim();
        let existing = ledger.category_by_name(name).map(|category| category.id.clone());
        check_category(ledger, name, budget, existing.as_deref())?;

        let color = preset_color(name).to_string();
        match existing.and_then(|id| ledger.category_mut(&id)) {
            Some(category) => {
                category.budget = budget;
                category.color = color;
                debug!(id = %category.id, name, budget, "category budget updated");
                Ok(Upsert::Updated(category.id.clone()))
            }
            None => {
                let id = ledger.add_category(Category::new(name, budget));
                debug!(%id, name, budget, "category created");
                Ok(Upsert::Created(id))
            }
        }
    }

    /// Renames and/or re-budgets a category. A new budget goes through the ceiling check
    /// against every other category.
    pub fn edit(ledger: &mut Ledger, id: &str, patch: CategoryPatch) -> Result<()> {
        if ledger.category(id).is_none() {
            return Err(LedgerError::not_found(Entity::Category, id));
        }
        let name = match patch.name.as_deref().map(str::trim) {
            Some("") => return Err(ValidationError::MissingField(Field::CategoryName).into()),
            other => other.map(str::to_string),
        };
        if let Some(budget) = patch.budget {
            check_budget_ceiling(ledger, budget, Some(id))?;
        }

        let category = ledger
            .category_mut(id)
            .ok_or_else(|| LedgerError::not_found(Entity::Category, id))?;
        if let Some(name) = name {
            category.color = preset_color(&name).to_string();
            category.name = name;
        }
        if let Some(budget) = patch.budget {
            category.budget = budget;
        }
        debug!(%id, "category edited");
        Ok(())
    }

    /// Deletes a category and clears its reference on every transaction that used it.
    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<CategoryRemoval> {
        let index = ledger
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| LedgerError::not_found(Entity::Category, id))?;
        let category = ledger.categories.remove(index);

        let mut detached_transactions = 0;
        for txn in ledger
            .transactions
            .iter_mut()
            .filter(|txn| txn.kind.category_id() == Some(id))
        {
            txn.kind = TransactionKind::Uncategorized;
            detached_transactions += 1;
        }
        debug!(%id, detached_transactions, "category removed");
        Ok(CategoryRemoval {
            category,
            detached_transactions,
        })
    }

    /// Drops every category and transaction. Income sources are kept.
    pub fn clear_all(ledger: &mut Ledger) {
        ledger.categories.clear();
        ledger.transactions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{IncomeSource, Transaction};
    use chrono::NaiveDate;

    fn funded_ledger(income: f64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_income_source(IncomeSource::new("Salary", income));
        ledger
    }

    fn spend(ledger: &mut Ledger, kind: TransactionKind) -> String {
        let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        ledger.add_transaction(Transaction::new("Item", 10.0, date, kind))
    }

    #[test]
    fn add_twice_with_same_name_updates_in_place() {
        let mut ledger = funded_ledger(1000.0);
        let first = CategoryService::add(&mut ledger, "Utilities", 100.0).unwrap();
        let second = CategoryService::add(&mut ledger, "Utilities", 150.0).unwrap();

        assert!(matches!(first, Upsert::Created(_)));
        assert_eq!(second, Upsert::Updated(first.id().to_string()));
        assert_eq!(ledger.categories.len(), 1);
        assert_eq!(ledger.categories[0].budget, 150.0);
    }

    #[test]
    fn upsert_can_raise_budget_to_the_full_income() {
        let mut ledger = funded_ledger(1000.0);
        CategoryService::add(&mut ledger, "Rent / Mortgage", 900.0).unwrap();
        CategoryService::add(&mut ledger, "Rent / Mortgage", 1000.0).unwrap();
        assert_eq!(ledger.categories[0].budget, 1000.0);
    }

    #[test]
    fn rejected_add_leaves_ledger_untouched() {
        let mut ledger = funded_ledger(1000.0);
        let before = ledger.clone();
        let err = CategoryService::add(&mut ledger, "Shopping", 1200.0).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::BudgetExceedsIncome { income }) if income == 1000.0
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn edit_checks_against_other_categories() {
        let mut ledger = funded_ledger(1000.0);
        let rent = CategoryService::add(&mut ledger, "Rent / Mortgage", 700.0).unwrap();
        let food = CategoryService::add(&mut ledger, "Food & Dining", 200.0).unwrap();

        let raise = CategoryPatch {
            budget: Some(300.0),
            ..CategoryPatch::default()
        };
        assert!(CategoryService::edit(&mut ledger, food.id(), raise).is_ok());

        let too_much = CategoryPatch {
            budget: Some(301.0),
            ..CategoryPatch::default()
        };
        assert!(CategoryService::edit(&mut ledger, food.id(), too_much).is_err());
        assert_eq!(ledger.category(food.id()).unwrap().budget, 300.0);

        let rename = CategoryPatch {
            name: Some("Shopping".into()),
            ..CategoryPatch::default()
        };
        CategoryService::edit(&mut ledger, rent.id(), rename).unwrap();
        let renamed = ledger.category(rent.id()).unwrap();
        assert_eq!(renamed.name, "Shopping");
        assert_eq!(renamed.color, "#FACC15");
    }

    #[test]
    fn edit_unknown_category_is_not_found() {
        let mut ledger = funded_ledger(1000.0);
        let err = CategoryService::edit(&mut ledger, "nope", CategoryPatch::default()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity: Entity::Category, .. }));
    }

    #[test]
    fn remove_cascades_to_transactions_only_for_that_category() {
        let mut ledger = funded_ledger(1000.0);
        let food = CategoryService::add(&mut ledger, "Food & Dining", 200.0).unwrap();
        let rent = CategoryService::add(&mut ledger, "Rent / Mortgage", 500.0).unwrap();
        let food_kind = TransactionKind::category(food.id());
        let rent_kind = TransactionKind::category(rent.id());
        let a = spend(&mut ledger, food_kind.clone());
        let b = spend(&mut ledger, food_kind);
        let c = spend(&mut ledger, rent_kind.clone());
        let d = spend(&mut ledger, TransactionKind::Income);

        let removal = CategoryService::remove(&mut ledger, food.id()).unwrap();
        assert_eq!(removal.detached_transactions, 2);
        assert!(ledger.category(food.id()).is_none());
        assert_eq!(ledger.transaction_count(), 4);
        assert_eq!(ledger.transaction(&a).unwrap().kind, TransactionKind::Uncategorized);
        assert_eq!(ledger.transaction(&b).unwrap().kind, TransactionKind::Uncategorized);
        assert_eq!(ledger.transaction(&c).unwrap().kind, rent_kind);
        assert_eq!(ledger.transaction(&d).unwrap().kind, TransactionKind::Income);
    }

    #[test]
    fn clear_all_keeps_income() {
        let mut ledger = funded_ledger(800.0);
        let food = CategoryService::add(&mut ledger, "Food & Dining", 200.0).unwrap();
        spend(&mut ledger, TransactionKind::category(food.id()));
        CategoryService::clear_all(&mut ledger);
        assert!(ledger.categories.is_empty());
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.income(), 800.0);
    }
}
