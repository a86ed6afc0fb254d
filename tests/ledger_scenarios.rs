mod common;

use saavr_core::{
    core::services::{NewTransaction, SummaryService, Upsert},
    errors::{LedgerError, ValidationError},
    ledger::TransactionKind,
};

use common::{current_month, memory_store};

fn spend(date: &str, amount: f64, kind: TransactionKind) -> NewTransaction<'_> {
    NewTransaction {
        name: "Row",
        amount,
        date,
        kind,
    }
}

#[test]
fn budget_ceiling_then_spend_scenario() {
    let mut store = memory_store();
    store.add_income_source("Salary", 1000.0).unwrap();
    assert_eq!(store.ledger().income(), 1000.0);

    let err = store.add_category("Shopping", 1200.0).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::BudgetExceedsIncome { .. })
    ));
    assert_eq!(
        err.to_string(),
        "Total budget exceeds your monthly income of $1,000."
    );
    assert!(store.ledger().categories.is_empty());
    assert_eq!(store.ledger().income(), 1000.0);

    let shopping = store.add_category("Shopping", 400.0).unwrap();
    store
        .add_transaction(spend(
            "2026-10-05",
            150.0,
            TransactionKind::category(shopping.id()),
        ))
        .unwrap();

    let ledger = store.ledger();
    let month = current_month();
    assert_eq!(SummaryService::spent_by_category(ledger, shopping.id(), month), 150.0);
    assert_eq!(SummaryService::remaining(ledger, month), 850.0);
}

#[test]
fn income_deposit_does_not_count_as_spend() {
    let mut store = memory_store();
    store.add_income_source("Salary", 2000.0).unwrap();
    let food = store.add_category("Food & Dining", 300.0).unwrap();
    store
        .add_transaction(spend("2026-10-02", 90.0, TransactionKind::category(food.id())))
        .unwrap();
    let before = SummaryService::total_spent(store.ledger(), current_month());

    store
        .add_transaction(spend("2026-10-15", 500.0, TransactionKind::Income))
        .unwrap();

    let ledger = store.ledger();
    assert_eq!(SummaryService::total_received_income(ledger, current_month()), 500.0);
    assert_eq!(SummaryService::total_spent(ledger, current_month()), before);
    assert_eq!(store.summary().income_progress.map(|p| p.percent), Some(25));
}

#[test]
fn total_spent_is_sum_over_categories() {
    let mut store = memory_store();
    store.add_income_source("Salary", 3000.0).unwrap();
    let ids: Vec<String> = ["Food & Dining", "Utilities", "Transportation"]
        .into_iter()
        .map(|name| store.add_category(name, 200.0).unwrap().id().to_string())
        .collect();

    let dates = ["2026-09-30", "2026-10-01", "2026-10-31", "2026-11-01"];
    for (idx, date) in dates.iter().enumerate() {
        let id = &ids[idx % ids.len()];
        store
            .add_transaction(spend(date, 10.0 * (idx + 1) as f64, TransactionKind::category(id)))
            .unwrap();
        store
            .add_transaction(spend(date, 7.0, TransactionKind::Uncategorized))
            .unwrap();
        store
            .add_transaction(spend(date, 11.0, TransactionKind::Income))
            .unwrap();
    }

    let ledger = store.ledger();
    let previous = current_month().shift(-1).unwrap();
    let next = current_month().shift(1).unwrap();
    for month in [previous, current_month(), next] {
        let per_category: f64 = ids
            .iter()
            .map(|id| SummaryService::spent_by_category(ledger, id, month))
            .sum();
        assert_eq!(SummaryService::total_spent(ledger, month), per_category, "{month}");
    }
    assert_eq!(SummaryService::total_spent(ledger, current_month()), 50.0);
}

#[test]
fn adding_same_category_twice_updates_in_place() {
    let mut store = memory_store();
    store.add_income_source("Salary", 1000.0).unwrap();
    let first = store.add_category("Savings", 250.0).unwrap();
    let second = store.add_category("Savings", 250.0).unwrap();
    let third = store.add_category("Savings", 300.0).unwrap();

    assert!(matches!(first, Upsert::Created(_)));
    assert_eq!(second, Upsert::Updated(first.id().to_string()));
    assert_eq!(third.id(), first.id());
    assert_eq!(store.ledger().categories.len(), 1);
    assert_eq!(store.ledger().categories[0].budget, 300.0);
}

#[test]
fn deleting_category_detaches_exactly_its_transactions() {
    let mut store = memory_store();
    store.add_income_source("Salary", 1000.0).unwrap();
    let doomed = store.add_category("Entertainment", 100.0).unwrap();
    let kept = store.add_category("Utilities", 100.0).unwrap();

    let mut doomed_txns = Vec::new();
    for day in ["2026-10-01", "2026-10-02", "2026-09-12"] {
        doomed_txns.push(
            store
                .add_transaction(spend(day, 5.0, TransactionKind::category(doomed.id())))
                .unwrap(),
        );
    }
    store
        .add_transaction(spend("2026-10-03", 5.0, TransactionKind::category(kept.id())))
        .unwrap();
    store
        .add_transaction(spend("2026-10-03", 5.0, TransactionKind::Income))
        .unwrap();
    let untouched: Vec<_> = store
        .ledger()
        .transactions
        .iter()
        .filter(|txn| !doomed_txns.contains(&txn.id))
        .cloned()
        .collect();

    let removal = store.delete_category(doomed.id()).unwrap();
    assert_eq!(removal.detached_transactions, 3);

    let ledger = store.ledger();
    assert!(ledger.category(doomed.id()).is_none());
    for id in &doomed_txns {
        assert_eq!(ledger.transaction(id).unwrap().kind, TransactionKind::Uncategorized);
    }
    for txn in &untouched {
        assert_eq!(ledger.transaction(&txn.id), Some(txn));
    }
    assert!(matches!(
        store.delete_category(doomed.id()),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn month_ceiling_blocks_forward_navigation() {
    let mut store = memory_store();
    let ceiling = store.max_month();
    assert_eq!(store.selected_month(), ceiling);
    for _ in 0..3 {
        assert!(!store.change_month(1).unwrap());
        assert_eq!(store.selected_month(), ceiling);
    }
    assert!(store.change_month(-13).unwrap());
    assert_eq!(store.selected_month().to_string(), "2025-09");
    assert!(!store.change_month(14).unwrap());
    assert!(store.change_month(13).unwrap());
    assert_eq!(store.selected_month(), ceiling);
}
