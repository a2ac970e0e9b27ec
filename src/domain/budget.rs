use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::common::{coerce_amount, coerce_id, non_blank, Displayable, Identifiable};
use crate::domain::transaction::UNCATEGORIZED;

/// A per-category monthly spending cap.
///
/// `spent` is tracked independently of transactions and may exceed `total`;
/// overruns are reported, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub total: f64,
    pub spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Budget {
    pub fn new(category: impl Into<String>, total: f64, spent: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category: category.into(),
            total: non_negative(total),
            spent: non_negative(spent),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!("{} ({:.2}/{:.2})", self.category, self.spent, self.total)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBudget {
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default)]
    pub spent: Option<Value>,
    #[serde(default)]
    pub icon: Option<String>,
}

pub fn normalize_budget(raw: RawBudget) -> Budget {
    Budget {
        id: coerce_id(raw.id.as_ref()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        category: non_blank(raw.category.as_deref()).unwrap_or_else(|| UNCATEGORIZED.to_string()),
        total: coerce_amount(raw.total.as_ref(), "total"),
        spent: coerce_amount(raw.spent.as_ref(), "spent"),
        icon: non_blank(raw.icon.as_deref()),
    }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_budget_tolerates_strings_and_gaps() {
        let raw: RawBudget = serde_json::from_value(json!({
            "_id": "b1",
            "category": "Food",
            "total": "300",
            "spent": null
        }))
        .unwrap();
        let budget = normalize_budget(raw);
        assert_eq!(budget.id, "b1");
        assert_eq!(budget.total, 300.0);
        assert_eq!(budget.spent, 0.0);
        assert!(budget.icon.is_none());
    }

    #[test]
    fn constructor_clamps_negative_values() {
        let budget = Budget::new("Fun", -10.0, 5.0);
        assert_eq!(budget.total, 0.0);
        assert_eq!(budget.spent, 5.0);
    }
}
