use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use saavr_core::{
    chart::{DonutChart, DonutLayout},
    core::{services::SummaryService, LedgerStore},
    ledger::{Category, FixedClock, IncomeSource, Ledger, Transaction, TransactionKind, YearMonth, PRESETS},
    storage::{JsonFileStore, KeyValueBackend, StorageKey},
};
use tempfile::tempdir;

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_income_source(IncomeSource::new("Salary", 5000.0));
    let ids: Vec<String> = PRESETS
        .iter()
        .map(|preset| ledger.add_category(Category::new(preset.name, 400.0)))
        .collect();

    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let kind = match idx % 12 {
            10 => TransactionKind::Income,
            11 => TransactionKind::Uncategorized,
            slot => TransactionKind::category(&ids[slot % ids.len()]),
        };
        ledger.add_transaction(Transaction::new("Row", 5.0 + (idx % 100) as f64, date, kind));
    }
    ledger
}

fn bench_aggregation(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let month = YearMonth::new(2025, 6).unwrap();

    c.bench_function("month_summary_10k", |b| {
        b.iter(|| black_box(SummaryService::month_summary(&ledger, month)))
    });

    c.bench_function("donut_10k", |b| {
        b.iter(|| black_box(DonutChart::for_month(&ledger, month, DonutLayout::default())))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let mut backend = JsonFileStore::new(dir.path()).expect("store");
    let transactions = serde_json::to_string(&ledger.transactions).expect("serialize");

    c.bench_function("transactions_save_10k", |b| {
        b.iter(|| {
            backend
                .set(StorageKey::Transactions.as_str(), &transactions)
                .expect("save transactions");
        })
    });

    c.bench_function("store_open_10k", |b| {
        b.iter(|| {
            let backend = JsonFileStore::new(dir.path()).expect("store");
            let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
            let opened = LedgerStore::open(Box::new(backend), Box::new(clock)).expect("open");
            black_box(opened);
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_store_io);
criterion_main!(benches);
