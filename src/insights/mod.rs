//! Spending insights computed from in-memory transaction lists.
//!
//! Everything here is a pure function of its arguments: no I/O, no clocks, no
//! shared state. [`crate::services::InsightService`] supplies "now" from a
//! [`crate::time::Clock`] for callers that want it.

pub mod aggregator;
pub mod formatter;
pub mod periods;
pub mod ratios;

pub use aggregator::{
    build_insights, group_expenses_by_category, CategoryTotal, InsightSummary, TrendDirection,
};
pub use formatter::{buddy_messages, format_insights, BuddyMessage, BuddyRole, InsightText};
pub use periods::PeriodBounds;
pub use ratios::{
    budget_overrun, compute_burn_rate, goal_delta, is_near_limit, percent_remaining,
    projected_month_spend, top_k_expense_categories, GoalDelta,
};
