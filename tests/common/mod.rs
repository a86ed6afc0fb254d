#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use saavr_core::{
    core::{LedgerStore, LoadReport},
    ledger::{Clock, FixedClock, YearMonth},
    storage::{JsonFileStore, MemoryStore},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// The date every test treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

pub fn clock() -> Box<dyn Clock> {
    Box::new(FixedClock(today()))
}

pub fn current_month() -> YearMonth {
    YearMonth::of(today())
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn memory_store() -> LedgerStore {
    let (store, _) = LedgerStore::open(Box::new(MemoryStore::new()), clock()).expect("open store");
    store
}

pub fn json_store(dir: &PathBuf) -> (LedgerStore, LoadReport) {
    let backend = JsonFileStore::new(dir.clone()).expect("create json store");
    LedgerStore::open(Box::new(backend), clock()).expect("open store")
}
