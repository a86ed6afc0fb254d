use tracing::debug;

use crate::core::validation::check_income_source;
use crate::errors::{Entity, LedgerError, Result};
use crate::ledger::{IncomeSource, Ledger};

/// Manages income sources. Every change refreshes the ledger's cached monthly income.
pub struct IncomeService;

impl IncomeService {
    pub fn add(ledger: &mut Ledger, name: &str, amount: f64) -> Result<String> {
        check_income_source(name, amount)?;
        let id = ledger.add_income_source(IncomeSource::new(name.trim(), amount));
        debug!(%id, amount, income = ledger.income(), "income source added");
        Ok(id)
    }

    pub fn edit(ledger: &mut Ledger, id: &str, name: &str, amount: f64) -> Result<()> {
        check_income_source(name, amount)?;
        let source = ledger
            .income_source_mut(id)
            .ok_or_else(|| LedgerError::not_found(Entity::IncomeSource, id))?;
        source.name = name.trim().to_string();
        source.amount = amount;
        let income = ledger.recompute_income();
        debug!(%id, income, "income source edited");
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<IncomeSource> {
        let removed = ledger
            .remove_income_source(id)
            .ok_or_else(|| LedgerError::not_found(Entity::IncomeSource, id))?;
        debug!(%id, income = ledger.income(), "income source removed");
        Ok(removed)
    }
}
