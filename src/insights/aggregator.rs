use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Transaction;
use crate::insights::periods::PeriodBounds;

/// Comparison of the current period's spending against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            TrendDirection::Up
        } else if diff < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}

/// Summed expense amount for one category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Aggregated view of a user's transactions for the current and previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_expense: f64,
    pub total_income: f64,
    pub allowance_used_pct: f64,
    pub top_category_name: Option<String>,
    pub top_category_amount: f64,
    pub prev_expenses_total: f64,
    pub trend_diff: f64,
    pub trend_direction: TrendDirection,
    /// Current-period expenses per category, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Builds the insight summary for `transactions`.
///
/// Transactions whose [`date_key`](Transaction::date_key) is at or after
/// `bounds.month_start` form the current period; those in
/// `[prev_month_start, prev_month_end)` form the previous one. The allowance
/// percentage is `0` unless `monthly_allowance` is positive.
pub fn build_insights(
    transactions: &[Transaction],
    monthly_allowance: f64,
    bounds: &PeriodBounds,
) -> InsightSummary {
    let mut total_expense = 0.0;
    let mut total_income = 0.0;
    let mut prev_expenses_total = 0.0;
    let mut current_expenses = Vec::new();

    for txn in transactions {
        let key = txn.date_key();
        if bounds.in_current(&key) {
            if txn.is_expense() {
                total_expense += magnitude(txn.amount);
                current_expenses.push(txn);
            } else if txn.is_income() {
                total_income += magnitude(txn.amount);
            }
        }
        if txn.is_expense() && bounds.in_previous(&key) {
            prev_expenses_total += magnitude(txn.amount);
        }
    }

    let category_breakdown = group_expenses_by_category(current_expenses);
    let (top_category_name, top_category_amount) = match category_breakdown.first() {
        Some(top) => (Some(top.category.clone()), top.amount),
        None => (None, 0.0),
    };

    let allowance_used_pct = if monthly_allowance.is_finite() && monthly_allowance > 0.0 {
        total_expense / monthly_allowance * 100.0
    } else {
        0.0
    };

    let trend_diff = total_expense - prev_expenses_total;

    InsightSummary {
        total_expense,
        total_income,
        allowance_used_pct,
        top_category_name,
        top_category_amount,
        prev_expenses_total,
        trend_diff,
        trend_direction: TrendDirection::from_diff(trend_diff),
        category_breakdown,
    }
}

/// Sums expense amounts per category label, largest total first.
///
/// Labels are compared exactly ("Food" and "food" are separate groups). Equal
/// totals keep the order in which their categories first appeared.
pub fn group_expenses_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
        let amount = magnitude(txn.amount);
        match positions.get(txn.category.as_str()) {
            Some(&idx) => totals[idx].amount += amount,
            None => {
                positions.insert(txn.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    amount,
                });
            }
        }
    }

    // `sort_by` is stable, which keeps first-seen order for ties.
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Absolute value of a finite amount; anything else counts as zero.
pub(crate) fn magnitude(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.abs()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn month_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn bounds() -> PeriodBounds {
        PeriodBounds::for_month_of(month_start())
    }

    fn expense(category: &str, amount: f64, date: DateTime<Utc>) -> Transaction {
        Transaction::new("u1", TransactionKind::Expense, category, amount, date)
    }

    fn income(category: &str, amount: f64, date: DateTime<Utc>) -> Transaction {
        Transaction::new("u1", TransactionKind::Income, category, amount, date)
    }

    #[test]
    fn food_and_salary_example() {
        let txns = vec![
            expense("Food", 40.0, month_start()),
            income("Salary", 1000.0, month_start()),
        ];
        let summary = build_insights(&txns, 200.0, &bounds());
        assert_eq!(summary.total_expense, 40.0);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.allowance_used_pct, 20.0);
        assert_eq!(summary.top_category_name.as_deref(), Some("Food"));
        assert_eq!(summary.top_category_amount, 40.0);
        assert_eq!(summary.trend_direction, TrendDirection::Up);
        assert_eq!(summary.trend_diff, 40.0);
    }

    #[test]
    fn boundary_millisecond_is_excluded() {
        let txns = vec![
            expense("Food", 10.0, month_start()),
            expense("Food", 99.0, month_start() - Duration::milliseconds(1)),
        ];
        let summary = build_insights(&txns, 0.0, &bounds());
        assert_eq!(summary.total_expense, 10.0);
        assert_eq!(summary.prev_expenses_total, 99.0);
        assert_eq!(summary.trend_direction, TrendDirection::Down);
        assert_eq!(summary.trend_diff, -89.0);
    }

    #[test]
    fn zero_allowance_yields_zero_pct() {
        let txns = vec![expense("Rent", 900.0, month_start())];
        assert_eq!(build_insights(&txns, 0.0, &bounds()).allowance_used_pct, 0.0);
        assert_eq!(build_insights(&txns, -5.0, &bounds()).allowance_used_pct, 0.0);
        assert_eq!(
            build_insights(&txns, f64::NAN, &bounds()).allowance_used_pct,
            0.0
        );
    }

    #[test]
    fn no_current_expenses_means_no_top_category() {
        let txns = vec![
            income("Salary", 100.0, month_start()),
            expense("Food", 20.0, month_start() - Duration::days(3)),
        ];
        let summary = build_insights(&txns, 100.0, &bounds());
        assert!(summary.top_category_name.is_none());
        assert_eq!(summary.top_category_amount, 0.0);
        assert!(summary.category_breakdown.is_empty());
    }

    #[test]
    fn ties_keep_first_seen_category() {
        let day = month_start() + Duration::days(2);
        let txns = vec![
            expense("Transport", 15.0, day),
            expense("Food", 10.0, day),
            expense("Food", 5.0, day),
            expense("food", 30.0, day),
        ];
        let summary = build_insights(&txns, 0.0, &bounds());
        let labels: Vec<_> = summary
            .category_breakdown
            .iter()
            .map(|row| (row.category.as_str(), row.amount))
            .collect();
        assert_eq!(labels, vec![("food", 30.0), ("Transport", 15.0), ("Food", 15.0)]);
    }

    #[test]
    fn equal_periods_are_flat() {
        let txns = vec![
            expense("Food", 25.0, month_start() + Duration::days(1)),
            expense("Food", 25.0, month_start() - Duration::days(10)),
        ];
        let summary = build_insights(&txns, 100.0, &bounds());
        assert_eq!(summary.trend_direction, TrendDirection::Flat);
        assert_eq!(summary.trend_diff, 0.0);
    }

    #[test]
    fn non_finite_amounts_count_as_zero() {
        let mut broken = expense("Food", 1.0, month_start());
        broken.amount = f64::NAN;
        let summary = build_insights(&[broken], 100.0, &bounds());
        assert_eq!(summary.total_expense, 0.0);
        assert!(summary.total_expense >= 0.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let txns = vec![
            expense("Food", 12.5, month_start()),
            expense("Fun", 7.25, month_start() + Duration::hours(5)),
        ];
        assert_eq!(
            build_insights(&txns, 300.0, &bounds()),
            build_insights(&txns, 300.0, &bounds())
        );
    }
}
