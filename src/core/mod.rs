//! Mutation gating, ledger services and the persisted store facade.

pub mod ledger_store;
pub mod preferences;
pub mod services;
pub mod validation;

pub use ledger_store::{LedgerStore, LoadReport, Subscriber};
pub use preferences::{Session, Theme};
