use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::common::{coerce_amount, coerce_id, non_blank, Displayable, Identifiable};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of a money movement. The amount itself is always non-negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parses the wire label case-insensitively; anything other than `income`
    /// is treated as an expense.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "income" => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

/// A single recorded money movement owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        owner: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.into(),
            kind,
            category: category.into(),
            amount: sanitize_amount(amount),
            description: None,
            date,
            created_at: date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description: String = description.into();
        self.description = non_blank(Some(description.as_str()));
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Normalized ISO-8601 form of `date` used for period comparisons, e.g.
    /// `2024-05-01T00:00:00.000Z`. Every key shares the same width and zone so
    /// lexicographic order matches chronological order.
    pub fn date_key(&self) -> String {
        iso_key(self.date)
    }

    /// Applies the editable fields from `patch`; id, owner, kind and creation
    /// time never change after creation.
    pub fn apply_patch(&mut self, patch: TransactionPatch) {
        if let Some(category) = non_blank(patch.category.as_deref()) {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = sanitize_amount(amount);
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description.as_str()));
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2} [{}]",
            self.date.format("%Y-%m-%d"),
            self.kind.label(),
            self.amount,
            self.category
        )
    }
}

/// Partial update accepted for an existing transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Transaction as it arrives from the REST layer: every field optional, ids
/// possibly populated documents, amounts possibly stringified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,
    #[serde(default, alias = "user")]
    pub owner: Option<Value>,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Maps a raw record onto a [`Transaction`], coercing anything malformed.
///
/// Unusable amounts become `0`, negative amounts lose their sign, an unreadable
/// `date` falls back to `createdAt` and then to the Unix epoch.
pub fn normalize_transaction(raw: RawTransaction) -> Transaction {
    let created_at = raw.created_at.as_deref().and_then(parse_timestamp);
    let date = match raw.date.as_deref().and_then(parse_timestamp) {
        Some(date) => date,
        None => {
            if raw.date.is_some() {
                tracing::debug!(date = ?raw.date, "unparseable transaction date");
            }
            created_at.unwrap_or_default()
        }
    };

    Transaction {
        id: coerce_id(raw.id.as_ref()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        owner: coerce_id(raw.owner.as_ref()).unwrap_or_default(),
        kind: TransactionKind::from_label(raw.kind.as_deref()),
        category: non_blank(raw.category.as_deref()).unwrap_or_else(|| UNCATEGORIZED.to_string()),
        amount: coerce_amount(raw.amount.as_ref(), "amount"),
        description: non_blank(raw.description.as_deref()),
        date,
        created_at: created_at.unwrap_or(date),
    }
}

pub fn normalize_transactions(raws: Vec<RawTransaction>) -> Vec<Transaction> {
    raws.into_iter().map(normalize_transaction).collect()
}

/// Formats an instant the way period boundaries are expressed.
pub fn iso_key(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses RFC 3339 timestamps, zone-less date-times (taken as UTC) and plain
/// `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.abs()
    } else {
        0.0
    }
}
