use std::cmp::Ordering;

use serde::Serialize;

use crate::chart::progress::{IncomeProgress, SpendProgress};
use crate::currency::sum_amounts;
use crate::ledger::{Category, Ledger, Transaction, TransactionKind, YearMonth};

/// How actual spend compares with a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
    Empty,
}

impl BudgetStatus {
    pub fn from_amounts(budgeted: f64, spent: f64) -> Self {
        if budgeted.abs() < f64::EPSILON && spent.abs() < f64::EPSILON {
            return BudgetStatus::Empty;
        }
        match spent.partial_cmp(&budgeted).unwrap_or(Ordering::Equal) {
            Ordering::Greater => BudgetStatus::OverBudget,
            Ordering::Less => BudgetStatus::UnderBudget,
            Ordering::Equal => BudgetStatus::OnTrack,
        }
    }
}

/// One category's month at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub budget: f64,
    pub spent: f64,
    /// `budget - spent`; negative when overspent.
    pub remaining: f64,
    pub status: BudgetStatus,
}

impl CategorySpend {
    /// Spent more than budgeted.
    pub fn is_over(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub income: f64,
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub received_income: f64,
    pub uncategorized_spent: f64,
    pub transaction_count: usize,
    pub categories: Vec<CategorySpend>,
    pub income_progress: Option<IncomeProgress>,
    pub spend_progress: SpendProgress,
}

/// Read-only month aggregation over a ledger.
pub struct SummaryService;

impl SummaryService {
    pub fn transactions_in_month(ledger: &Ledger, month: YearMonth) -> Vec<&Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|txn| month.contains(txn.date))
            .collect()
    }

    pub fn spent_by_category(ledger: &Ledger, category_id: &str, month: YearMonth) -> f64 {
        Self::sum_where(ledger, month, |kind| kind.category_id() == Some(category_id))
    }

    /// Spend across existing categories only; deposits and uncategorized rows do not count.
    pub fn total_spent(ledger: &Ledger, month: YearMonth) -> f64 {
        sum_amounts(
            ledger
                .categories
                .iter()
                .map(|category| Self::spent_by_category(ledger, &category.id, month)),
        )
    }

    pub fn total_received_income(ledger: &Ledger, month: YearMonth) -> f64 {
        Self::sum_where(ledger, month, TransactionKind::is_income)
    }

    pub fn uncategorized_spent(ledger: &Ledger, month: YearMonth) -> f64 {
        Self::sum_where(ledger, month, |kind| *kind == TransactionKind::Uncategorized)
    }

    pub fn total_budgeted(ledger: &Ledger) -> f64 {
        sum_amounts(ledger.categories.iter().map(|category| category.budget))
    }

    /// Income left after this month's category spend. Not clamped.
    pub fn remaining(ledger: &Ledger, month: YearMonth) -> f64 {
        ledger.income() - Self::total_spent(ledger, month)
    }

    pub fn category_spend(ledger: &Ledger, category: &Category, month: YearMonth) -> CategorySpend {
        let spent = Self::spent_by_category(ledger, &category.id, month);
        CategorySpend {
            category_id: category.id.clone(),
            name: category.name.clone(),
            color: category.color.clone(),
            budget: category.budget,
            spent,
            remaining: category.budget - spent,
            status: BudgetStatus::from_amounts(category.budget, spent),
        }
    }

    pub fn month_summary(ledger: &Ledger, month: YearMonth) -> MonthSummary {
        let income = ledger.income();
        let categories: Vec<CategorySpend> = ledger
            .categories
            .iter()
            .map(|category| Self::category_spend(ledger, category, month))
            .collect();
        let total_spent = sum_amounts(categories.iter().map(|row| row.spent));
        let received_income = Self::total_received_income(ledger, month);

        MonthSummary {
            month,
            income,
            total_budgeted: Self::total_budgeted(ledger),
            total_spent,
            remaining: income - total_spent,
            received_income,
            uncategorized_spent: Self::uncategorized_spent(ledger, month),
            transaction_count: Self::transactions_in_month(ledger, month).len(),
            categories,
            income_progress: IncomeProgress::new(received_income, income),
            spend_progress: SpendProgress::new(total_spent, income),
        }
    }

    fn sum_where<F>(ledger: &Ledger, month: YearMonth, predicate: F) -> f64
    where
        F: Fn(&TransactionKind) -> bool,
    {
        sum_amounts(
            ledger
                .transactions
                .iter()
                .filter(|txn| month.contains(txn.date) && predicate(&txn.kind))
                .map(|txn| txn.amount),
        )
    }
}
