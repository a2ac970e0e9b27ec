mod common;

use std::fs;

use budget_buddy::{
    config::{KeyValueStore, SETTINGS_KEY},
    domain::{transaction::UNCATEGORIZED, Budget, Goal, TransactionKind},
    insights::{build_insights, PeriodBounds},
    storage::{BudgetSource, TransactionSource},
};
use chrono::{TimeZone, Utc};
use common::setup_test_env;

#[test]
fn rest_export_loads_through_normalization() {
    let (_home, store, _settings) = setup_test_env();
    let payload = r#"[
        {"_id": "a1", "user": {"_id": "u1"}, "type": "Expense", "category": "Food",
         "amount": 40, "date": "2024-05-01T00:00:00.000Z", "createdAt": "2024-05-01T00:00:00.000Z"},
        {"_id": "a2", "user": "u1", "type": "Income", "category": "Salary",
         "amount": "1000", "date": "2024-05-03T09:00:00.000Z"},
        {"_id": "a3", "user": "u1", "type": "mystery", "amount": -12.5, "date": "garbage"}
    ]"#;
    fs::write(store.transactions_path(), payload).expect("write export");

    let txns = TransactionSource::list(&store).expect("load transactions");
    assert_eq!(txns.len(), 3);
    assert!(txns.iter().all(|txn| txn.owner == "u1"));
    assert_eq!(txns[1].amount, 1000.0);
    assert_eq!(txns[2].kind, TransactionKind::Expense);
    assert_eq!(txns[2].category, UNCATEGORIZED);
    assert_eq!(txns[2].amount, 12.5);
    assert_eq!(txns[2].date_key(), "1970-01-01T00:00:00.000Z");

    let bounds = PeriodBounds::for_month_of(Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap());
    let summary = build_insights(&txns, 200.0, &bounds);
    assert_eq!(summary.total_expense, 40.0);
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.allowance_used_pct, 20.0);
}

#[test]
fn budgets_and_goals_survive_a_reload() {
    let (_home, store, _settings) = setup_test_env();
    let budget = store
        .upsert_budget(Budget::new("Food", 300.0, 120.0).with_icon("🍔"))
        .expect("save budget");
    let goal = store.upsert_goal(Goal::new("Laptop", 1200.0, 300.0)).expect("save goal");

    assert_eq!(BudgetSource::list(&store).expect("budgets"), vec![budget]);
    assert_eq!(store.load_goals().expect("goals"), vec![goal]);
}

#[test]
fn settings_persist_under_versioned_key() {
    let (_home, _store, settings) = setup_test_env();
    let saved = settings
        .update(|current| {
            current.monthly_allowance = 450.0;
            current.currency = "EUR".into();
        })
        .expect("update settings");

    let blob = settings
        .store()
        .get(SETTINGS_KEY)
        .expect("read store")
        .expect("settings blob present");
    assert!(blob.contains("\"monthlyAllowance\""));
    assert!(settings.store().dir().join(format!("{SETTINGS_KEY}.json")).exists());
    assert_eq!(settings.load().expect("reload"), saved);
}

#[test]
fn settings_backups_restore_previous_values() {
    let (_home, _store, settings) = setup_test_env();
    settings
        .update(|current| current.monthly_allowance = 100.0)
        .expect("first save");
    let backup = settings.backup(Some("before raise")).expect("backup");
    settings
        .update(|current| current.monthly_allowance = 900.0)
        .expect("second save");

    assert!(settings.list_backups().expect("list").contains(&backup));
    let restored = settings.restore(&backup).expect("restore");
    assert_eq!(restored.monthly_allowance, 100.0);
    assert_eq!(settings.load().expect("reload").monthly_allowance, 100.0);
}

#[test]
fn negative_allowance_is_rejected() {
    let (_home, _store, settings) = setup_test_env();
    assert!(settings
        .update(|current| current.monthly_allowance = -5.0)
        .is_err());
    assert_eq!(settings.load().expect("defaults").monthly_allowance, 0.0);
}
