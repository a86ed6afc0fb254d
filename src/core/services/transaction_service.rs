use tracing::debug;

use crate::core::validation::{check_kind, check_transaction};
use crate::errors::{Entity, LedgerError, Result};
use crate::ledger::{Ledger, Transaction, TransactionKind};

/// Raw form input for a new transaction. The date stays textual until validation parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction<'a> {
    pub name: &'a str,
    pub amount: f64,
    pub date: &'a str,
    pub kind: TransactionKind,
}

pub struct TransactionService;

impl TransactionService {
    pub fn add(ledger: &mut Ledger, input: NewTransaction<'_>) -> Result<String> {
        let date = check_transaction(ledger, input.name, input.amount, input.date, &input.kind)?;
        let txn = Transaction::new(input.name.trim(), input.amount, date, input.kind);
        let id = ledger.add_transaction(txn);
        debug!(%id, amount = input.amount, %date, "transaction recorded");
        Ok(id)
    }

    /// Moves a transaction to another category, to income, or to uncategorized.
    pub fn set_category(ledger: &mut Ledger, id: &str, kind: TransactionKind) -> Result<()> {
        check_kind(ledger, &kind)?;
        let txn = ledger
            .transaction_mut(id)
            .ok_or_else(|| LedgerError::not_found(Entity::Transaction, id))?;
        debug!(%id, %kind, "transaction recategorized");
        txn.kind = kind;
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &str) -> Result<Transaction> {
        let removed = ledger
            .remove_transaction(id)
            .ok_or_else(|| LedgerError::not_found(Entity::Transaction, id))?;
        debug!(%id, "transaction removed");
        Ok(removed)
    }
}
