#![doc(test(attr(deny(warnings))))]

//! Saavr core: the month model, ledger store, aggregation engine, donut chart geometry and
//! validation rules behind the Saavr budgeting app.

pub mod chart;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Saavr core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
