//! Clamped percentages and small projections used for progress bars.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Budget, Goal, Transaction};
use crate::insights::aggregator::{group_expenses_by_category, magnitude, CategoryTotal};
use crate::insights::periods::same_utc_month;

pub const DEFAULT_NEAR_LIMIT_PCT: f64 = 10.0;
pub const DEFAULT_BURN_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_TOP_K: usize = 3;

/// Share of the budget still available, in `[0, 100]`. Zero when `total <= 0`.
pub fn percent_remaining(budget: &Budget) -> f64 {
    let total = finite(budget.total);
    if total <= 0.0 {
        return 0.0;
    }
    ((total - finite(budget.spent)) / total * 100.0).clamp(0.0, 100.0)
}

pub fn is_near_limit(budget: &Budget, threshold_pct: f64) -> bool {
    percent_remaining(budget) < threshold_pct
}

pub fn budget_overrun(budget: &Budget) -> bool {
    finite(budget.spent) > finite(budget.total)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalDelta {
    pub remaining: f64,
    pub pct: f64,
}

pub fn goal_delta(goal: &Goal) -> GoalDelta {
    let target = finite(goal.target);
    let saved = finite(goal.saved);
    let pct = if target > 0.0 {
        (saved / target * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    GoalDelta {
        remaining: (target - saved).max(0.0),
        pct,
    }
}

/// Average daily expense over `[now - days_window, now]`.
///
/// Windows reaching past the earliest representable instant start there.
pub fn compute_burn_rate(transactions: &[Transaction], days_window: i64, now: DateTime<Utc>) -> f64 {
    if transactions.is_empty() || days_window <= 0 {
        return 0.0;
    }
    let window_start = Duration::try_days(days_window)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let total: f64 = transactions
        .iter()
        .filter(|txn| txn.is_expense() && txn.date >= window_start && txn.date <= now)
        .map(|txn| magnitude(txn.amount))
        .sum();
    total / days_window as f64
}

/// Spend expected over a month at the given daily burn rate.
pub fn projected_month_spend(burn_rate: f64, days_in_month: u32) -> f64 {
    finite(burn_rate).max(0.0) * f64::from(days_in_month)
}

/// Largest expense categories within the UTC calendar month of `month_ref`.
pub fn top_k_expense_categories(
    transactions: &[Transaction],
    k: usize,
    month_ref: DateTime<Utc>,
) -> Vec<CategoryTotal> {
    if k == 0 {
        return Vec::new();
    }
    let mut totals = group_expenses_by_category(
        transactions
            .iter()
            .filter(|txn| same_utc_month(txn.date, month_ref)),
    );
    totals.truncate(k);
    totals
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
