use budget_buddy::domain::{Transaction, TransactionKind};
use budget_buddy::insights::{build_insights, top_k_expense_categories, PeriodBounds};
use budget_buddy::storage::JsonStore;
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

const CATEGORIES: [&str; 6] = ["Food", "Rent", "Transport", "Fun", "Health", "Shopping"];

fn sample_transactions(count: usize) -> Vec<Transaction> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let kind = if idx % 10 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::new(
                "bench",
                kind,
                CATEGORIES[idx % CATEGORIES.len()],
                5.0 + (idx % 120) as f64,
                start + Duration::hours((idx % (24 * 180)) as i64),
            )
        })
        .collect()
}

fn bench_insights(c: &mut Criterion) {
    let transactions = sample_transactions(black_box(10_000));
    let reference = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
    let bounds = PeriodBounds::for_month_of(reference);

    c.bench_function("build_insights_10k", |b| {
        b.iter(|| black_box(build_insights(&transactions, 1_500.0, &bounds)))
    });

    c.bench_function("top_k_categories_10k", |b| {
        b.iter(|| black_box(top_k_expense_categories(&transactions, 3, reference)))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let transactions = sample_transactions(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().to_path_buf()).expect("store");

    c.bench_function("save_transactions_10k", |b| {
        b.iter(|| store.save_transactions(&transactions).expect("save"))
    });

    store.save_transactions(&transactions).expect("seed");

    c.bench_function("load_transactions_10k", |b| {
        b.iter(|| black_box(store.load_transactions().expect("load")))
    });
}

criterion_group!(benches, bench_insights, bench_store_io);
criterion_main!(benches);
