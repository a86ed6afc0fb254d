use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::chart::{DonutChart, DonutLayout};
use crate::currency::coerce_amount;
use crate::errors::{LedgerError, PersistenceError, Result};
use crate::ledger::{
    clamp_to_ceiling, max_allowed_month, Clock, Ledger, Transaction, TransactionKind, YearMonth,
};
use crate::storage::{KeyValueBackend, StorageKey};

use super::preferences::Theme;
use super::services::{
    CategoryPatch, CategoryRemoval, CategoryService, IncomeService, MonthSummary, NewTransaction,
    SummaryService, TransactionService, Upsert,
};

/// Callback run after every successful mutation with the selected month's summary.
pub type Subscriber = Box<dyn FnMut(&MonthSummary)>;

/// Problems recovered while opening a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub warnings: Vec<PersistenceError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Facade over the ledger, its persisted keys and the month being viewed.
///
/// Every mutation validates first, then commits, persists the keys it touched and notifies
/// subscribers. A rejected mutation leaves memory and storage untouched.
pub struct LedgerStore {
    ledger: Ledger,
    selected_month: YearMonth,
    theme: Theme,
    backend: Box<dyn KeyValueBackend>,
    clock: Box<dyn Clock>,
    subscribers: Vec<Subscriber>,
}

impl LedgerStore {
    /// Loads every key from `backend`. Missing keys start empty; unreadable ones are reset
    /// and reported rather than failing the open.
    pub fn open(backend: Box<dyn KeyValueBackend>, clock: Box<dyn Clock>) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::default();
        let categories = read_collection(backend.as_ref(), StorageKey::Categories, &mut report)?;
        let transactions = read_collection(backend.as_ref(), StorageKey::Transactions, &mut report)?;
        let incomes = read_collection(backend.as_ref(), StorageKey::Incomes, &mut report)?;
        let ledger = Ledger::from_parts(categories, transactions, incomes);

        let cached_income = read_income_cache(backend.as_ref(), &mut report)?;
        let stored_month = read_month(backend.as_ref(), &mut report)?;
        let theme = Theme::from_stored(backend.get(StorageKey::Theme.as_str())?.as_deref());
        let selected_month = match stored_month {
            Some(month) => clamp_to_ceiling(month, clock.as_ref()),
            None => YearMonth::current(clock.as_ref()),
        };

        let mut store = Self {
            ledger,
            selected_month,
            theme,
            backend,
            clock,
            subscribers: Vec::new(),
        };

        let actual = store.ledger.income();
        match cached_income {
            Some(cached) if cached.to_bits() == actual.to_bits() => {}
            Some(cached) => {
                warn!(cached, actual, "income cache out of date, recomputing");
                report
                    .warnings
                    .push(PersistenceError::StaleIncomeCache { cached, actual });
                store.persist_income()?;
            }
            None => {
                let present = store.backend.get(StorageKey::Income.as_str())?.is_some();
                if present || actual != 0.0 {
                    store.persist_income()?;
                }
            }
        }
        if stored_month != Some(store.selected_month) {
            store.persist_month()?;
        }

        for warning in &report.warnings {
            warn!(%warning, "recovered while loading");
        }
        info!(
            categories = store.ledger.categories.len(),
            transactions = store.ledger.transactions.len(),
            incomes = store.ledger.incomes.len(),
            month = %store.selected_month,
            "ledger loaded"
        );
        Ok((store, report))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn selected_month(&self) -> YearMonth {
        self.selected_month
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::current(self.clock.as_ref())
    }

    pub fn max_month(&self) -> YearMonth {
        max_allowed_month(self.clock.as_ref())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn backend(&self) -> &dyn KeyValueBackend {
        self.backend.as_ref()
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Summary of the selected month.
    pub fn summary(&self) -> MonthSummary {
        SummaryService::month_summary(&self.ledger, self.selected_month)
    }

    pub fn summary_for(&self, month: YearMonth) -> MonthSummary {
        SummaryService::month_summary(&self.ledger, month)
    }

    /// Donut for the selected month.
    pub fn chart(&self, layout: DonutLayout) -> DonutChart {
        DonutChart::for_month(&self.ledger, self.selected_month, layout)
    }

    /// Donut for the current calendar month, whatever month is being browsed.
    pub fn dashboard_chart(&self, layout: DonutLayout) -> DonutChart {
        DonutChart::for_month(&self.ledger, self.current_month(), layout)
    }

    pub fn add_category(&mut self, name: &str, budget: f64) -> Result<Upsert> {
        self.commit(&[StorageKey::Categories], |ledger| {
            CategoryService::add(ledger, name, budget)
        })
    }

    pub fn edit_category(&mut self, id: &str, patch: CategoryPatch) -> Result<()> {
        self.commit(&[StorageKey::Categories], |ledger| {
            CategoryService::edit(ledger, id, patch)
        })
    }

    /// Deletes a category; its transactions stay and become uncategorized.
    pub fn delete_category(&mut self, id: &str) -> Result<CategoryRemoval> {
        self.commit(&[StorageKey::Categories, StorageKey::Transactions], |ledger| {
            CategoryService::remove(ledger, id)
        })
    }

    pub fn add_transaction(&mut self, input: NewTransaction<'_>) -> Result<String> {
        self.commit(&[StorageKey::Transactions], |ledger| {
            TransactionService::add(ledger, input)
        })
    }

    pub fn set_transaction_category(&mut self, id: &str, kind: TransactionKind) -> Result<()> {
        self.commit(&[StorageKey::Transactions], |ledger| {
            TransactionService::set_category(ledger, id, kind)
        })
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        self.commit(&[StorageKey::Transactions], |ledger| {
            TransactionService::remove(ledger, id)
        })
    }

    pub fn add_income_source(&mut self, name: &str, amount: f64) -> Result<String> {
        self.commit(&[StorageKey::Incomes, StorageKey::Income], |ledger| {
            IncomeService::add(ledger, name, amount)
        })
    }

    pub fn edit_income_source(&mut self, id: &str, name: &str, amount: f64) -> Result<()> {
        self.commit(&[StorageKey::Incomes, StorageKey::Income], |ledger| {
            IncomeService::edit(ledger, id, name, amount)
        })
    }

    pub fn delete_income_source(&mut self, id: &str) -> Result<()> {
        self.commit(&[StorageKey::Incomes, StorageKey::Income], |ledger| {
            IncomeService::remove(ledger, id).map(|_| ())
        })
    }

    /// Steps the selected month by `offset`. Returns `false`, changing nothing, when the
    /// target lies past the ceiling or outside the representable calendar.
    pub fn change_month(&mut self, offset: i32) -> Result<bool> {
        let Some(target) = self
            .selected_month
            .shift(offset)
            .filter(|target| *target <= self.max_month())
        else {
            debug!(offset, "month navigation past ceiling ignored");
            return Ok(false);
        };
        self.backend
            .set(StorageKey::SelectedMonth.as_str(), &target.to_string())?;
        self.selected_month = target;
        debug!(month = %target, "selected month changed");
        self.notify();
        Ok(true)
    }

    /// Removes every category and transaction. Income sources stay.
    pub fn clear_all(&mut self) -> Result<()> {
        self.commit(&[StorageKey::Categories, StorageKey::Transactions], |ledger| {
            CategoryService::clear_all(ledger);
            Ok(())
        })?;
        info!("categories and transactions cleared");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.backend.set(StorageKey::Theme.as_str(), theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    /// Applies `change` to a staged copy of the ledger, writes `keys` from it and only then
    /// swaps it in and notifies. A failed write restores the keys already written, so both
    /// memory and storage keep the previous state.
    fn commit<T>(
        &mut self,
        keys: &[StorageKey],
        change: impl FnOnce(&mut Ledger) -> Result<T>,
    ) -> Result<T> {
        let mut staged = self.ledger.clone();
        let outcome = change(&mut staged)?;

        for (written, key) in keys.iter().enumerate() {
            if let Err(err) = write_key(self.backend.as_mut(), *key, &staged) {
                for done in &keys[..written] {
                    if let Err(restore) = write_key(self.backend.as_mut(), *done, &self.ledger) {
                        warn!(key = done.as_str(), %restore, "could not restore key after failed write");
                    }
                }
                warn!(key = key.as_str(), %err, "write failed, mutation discarded");
                return Err(err);
            }
        }

        self.ledger = staged;
        self.notify();
        Ok(outcome)
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let summary = self.summary();
        for subscriber in &mut self.subscribers {
            (*subscriber)(&summary);
        }
    }

    fn persist_income(&mut self) -> Result<()> {
        write_key(self.backend.as_mut(), StorageKey::Income, &self.ledger)
    }

    fn persist_month(&mut self) -> Result<()> {
        let month = self.selected_month.to_string();
        self.backend.set(StorageKey::SelectedMonth.as_str(), &month)
    }
}

/// Writes the blob `ledger` holds for `key`.
fn write_key(backend: &mut dyn KeyValueBackend, key: StorageKey, ledger: &Ledger) -> Result<()> {
    match key {
        StorageKey::Categories => write_json(backend, key, &ledger.categories),
        StorageKey::Transactions => write_json(backend, key, &ledger.transactions),
        StorageKey::Incomes => write_json(backend, key, &ledger.incomes),
        StorageKey::Income => write_json(backend, key, &ledger.income()),
        other => Err(LedgerError::Storage(format!(
            "`{}` is not a ledger collection",
            other.as_str()
        ))),
    }
}

fn write_json<T: Serialize + ?Sized>(
    backend: &mut dyn KeyValueBackend,
    key: StorageKey,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    backend.set(key.as_str(), &json)
}

fn corrupt(report: &mut LoadReport, key: StorageKey, reason: impl ToString) {
    report.warnings.push(PersistenceError::CorruptData {
        key: key.as_str().to_string(),
        reason: reason.to_string(),
    });
}

fn read_collection<T: DeserializeOwned>(
    backend: &dyn KeyValueBackend,
    key: StorageKey,
    report: &mut LoadReport,
) -> Result<Vec<T>> {
    let Some(raw) = backend.get(key.as_str())? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => Ok(items.unwrap_or_default()),
        Err(err) => {
            corrupt(report, key, err);
            Ok(Vec::new())
        }
    }
}

fn read_income_cache(backend: &dyn KeyValueBackend, report: &mut LoadReport) -> Result<Option<f64>> {
    let Some(raw) = backend.get(StorageKey::Income.as_str())? else {
        return Ok(None);
    };
    let text = raw.trim().trim_matches('"');
    match text.parse::<f64>() {
        Ok(value) => Ok(Some(coerce_amount(value))),
        Err(err) => {
            corrupt(report, StorageKey::Income, err);
            Ok(None)
        }
    }
}

fn read_month(backend: &dyn KeyValueBackend, report: &mut LoadReport) -> Result<Option<YearMonth>> {
    let Some(raw) = backend.get(StorageKey::SelectedMonth.as_str())? else {
        return Ok(None);
    };
    match raw.trim().trim_matches('"').parse::<YearMonth>() {
        Ok(month) => Ok(Some(month)),
        Err(err) => {
            corrupt(report, StorageKey::SelectedMonth, err);
            Ok(None)
        }
    }
}
