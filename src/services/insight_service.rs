use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::currency::MoneyFormat;
use crate::domain::Transaction;
use crate::insights::{
    build_insights, compute_burn_rate, format_insights, periods::days_in_month,
    projected_month_spend, top_k_expense_categories, CategoryTotal, InsightSummary, InsightText,
    PeriodBounds,
};
use crate::time::{Clock, SystemClock};

/// Everything the insights screen shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSnapshot {
    pub bounds: PeriodBounds,
    pub summary: InsightSummary,
    pub text: InsightText,
    pub burn_rate: f64,
    pub projected_month_spend: f64,
    pub top_categories: Vec<CategoryTotal>,
}

/// Feeds the pure insight functions with the current time from a [`Clock`].
pub struct InsightService<C = SystemClock> {
    clock: C,
}

impl InsightService<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> InsightService<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn bounds(&self) -> PeriodBounds {
        PeriodBounds::for_month_of(self.clock.now())
    }

    pub fn summary(&self, transactions: &[Transaction], monthly_allowance: f64) -> InsightSummary {
        let bounds = self.bounds();
        let summary = build_insights(transactions, monthly_allowance, &bounds);
        tracing::debug!(
            transactions = transactions.len(),
            total_expense = summary.total_expense,
            trend = ?summary.trend_direction,
            "built insight summary"
        );
        summary
    }

    pub fn text(
        &self,
        transactions: &[Transaction],
        monthly_allowance: f64,
        money: &MoneyFormat,
    ) -> InsightText {
        format_insights(&self.summary(transactions, monthly_allowance), money)
    }

    pub fn burn_rate(&self, transactions: &[Transaction], days_window: i64) -> f64 {
        compute_burn_rate(transactions, days_window, self.clock.now())
    }

    pub fn top_categories(&self, transactions: &[Transaction], k: usize) -> Vec<CategoryTotal> {
        top_k_expense_categories(transactions, k, self.clock.now())
    }

    pub fn snapshot(
        &self,
        transactions: &[Transaction],
        monthly_allowance: f64,
        days_window: i64,
        k: usize,
        money: &MoneyFormat,
    ) -> InsightSnapshot {
        let now = self.clock.now();
        let bounds = PeriodBounds::for_month_of(now);
        let summary = build_insights(transactions, monthly_allowance, &bounds);
        let text = format_insights(&summary, money);
        let burn_rate = compute_burn_rate(transactions, days_window, now);
        InsightSnapshot {
            projected_month_spend: projected_month_spend(
                burn_rate,
                days_in_month(now.year(), now.month()),
            ),
            top_categories: top_k_expense_categories(transactions, k, now),
            bounds,
            summary,
            text,
            burn_rate,
        }
    }
}
