use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::transaction::iso_key;

/// The three boundary timestamps that define the current and previous
/// reporting windows.
///
/// Boundaries are compared lexicographically against
/// [`Transaction::date_key`](crate::domain::Transaction::date_key), so callers
/// must supply them in the same UTC millisecond form
/// (`2024-05-01T00:00:00.000Z`). [`PeriodBounds::for_month_of`] does this for you.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBounds {
    pub month_start: String,
    pub prev_month_start: String,
    pub prev_month_end: String,
}

impl PeriodBounds {
    pub fn new(
        month_start: impl Into<String>,
        prev_month_start: impl Into<String>,
        prev_month_end: impl Into<String>,
    ) -> Self {
        Self {
            month_start: month_start.into(),
            prev_month_start: prev_month_start.into(),
            prev_month_end: prev_month_end.into(),
        }
    }

    /// Bounds for the UTC calendar month containing `reference`; the previous
    /// window ends where the current one starts.
    pub fn for_month_of(reference: DateTime<Utc>) -> Self {
        let current = month_start(reference.date_naive());
        let previous = shift_months(current, -1);
        let month_start = iso_key(midnight(current));
        Self {
            prev_month_start: iso_key(midnight(previous)),
            prev_month_end: month_start.clone(),
            month_start,
        }
    }

    /// "This period" has no upper bound.
    pub fn in_current(&self, date_key: &str) -> bool {
        date_key >= self.month_start.as_str()
    }

    pub fn in_previous(&self, date_key: &str) -> bool {
        date_key >= self.prev_month_start.as_str() && date_key < self.prev_month_end.as_str()
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn same_utc_month(left: DateTime<Utc>, right: DateTime<Utc>) -> bool {
    left.year() == right.year() && left.month() == right.month()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.map(|date| shift_months(date, 1));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Moves a first-of-month date by whole months.
fn shift_months(first_of_month: NaiveDate, months: i32) -> NaiveDate {
    let index = first_of_month.year() * 12 + first_of_month.month0() as i32 + months;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(first_of_month)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
