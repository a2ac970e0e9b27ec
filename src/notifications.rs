//! Budget and goal alerts derived from the ratio helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NotificationPrefs;
use crate::currency::MoneyFormat;
use crate::domain::{Budget, Goal, Transaction};
use crate::insights::ratios::{
    budget_overrun, compute_burn_rate, goal_delta, is_near_limit, percent_remaining,
};

/// Trailing window covered by the weekly digest.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    BudgetNearLimit,
    BudgetOverrun,
    GoalReached,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    /// Id of the budget or goal the alert is about.
    pub subject_id: String,
    pub title: String,
    pub message: String,
}

/// Alerts for the given budgets and goals, budgets first, each in input order.
///
/// A budget raises at most one alert: an overrun wins over near-limit.
pub fn collect_alerts(budgets: &[Budget], goals: &[Goal], prefs: &NotificationPrefs) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if prefs.budget_alerts {
        for budget in budgets {
            if budget_overrun(budget) {
                alerts.push(Alert {
                    kind: AlertKind::BudgetOverrun,
                    subject_id: budget.id.clone(),
                    title: format!("{} budget exceeded", budget.category),
                    message: format!(
                        "You've spent {:.2} of your {:.2} {} budget.",
                        budget.spent, budget.total, budget.category
                    ),
                });
            } else if is_near_limit(budget, prefs.near_limit_pct) {
                alerts.push(Alert {
                    kind: AlertKind::BudgetNearLimit,
                    subject_id: budget.id.clone(),
                    title: format!("{} budget almost used", budget.category),
                    message: format!(
                        "Only {:.0}% of your {} budget is left.",
                        percent_remaining(budget),
                        budget.category
                    ),
                });
            }
        }
    }

    if prefs.goal_reminders {
        for goal in goals {
            let delta = goal_delta(goal);
            if goal.target > 0.0 && delta.pct >= 100.0 {
                alerts.push(Alert {
                    kind: AlertKind::GoalReached,
                    subject_id: goal.id.clone(),
                    title: format!("{} reached", goal.name),
                    message: format!("You've saved {:.2} toward {}.", goal.saved, goal.name),
                });
            }
        }
    }

    alerts
}

/// Spending over the trailing week, only when `weekly_summary` is enabled.
pub fn weekly_digest(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    money: &MoneyFormat,
    prefs: &NotificationPrefs,
) -> Option<String> {
    if !prefs.weekly_summary {
        return None;
    }
    let days = WEEKLY_WINDOW_DAYS as f64;
    let spent = compute_burn_rate(transactions, WEEKLY_WINDOW_DAYS, now) * days;
    Some(format!(
        "Weekly summary: you spent {} in the last {WEEKLY_WINDOW_DAYS} days.",
        money.format(spent)
    ))
}
