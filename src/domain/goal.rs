use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::budget::non_negative;
use crate::domain::common::{coerce_amount, coerce_id, non_blank, Displayable, Identifiable};

/// A savings target. `saved` may run past `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub saved: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target: f64, saved: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            target: non_negative(target),
            saved: non_negative(saved),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl Identifiable for Goal {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!("{} ({:.2}/{:.2})", self.name, self.saved, self.target)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGoal {
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target: Option<Value>,
    #[serde(default)]
    pub saved: Option<Value>,
    #[serde(default)]
    pub icon: Option<String>,
}

pub fn normalize_goal(raw: RawGoal) -> Goal {
    Goal {
        id: coerce_id(raw.id.as_ref()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: non_blank(raw.name.as_deref()).unwrap_or_else(|| "Untitled goal".to_string()),
        target: coerce_amount(raw.target.as_ref(), "target"),
        saved: coerce_amount(raw.saved.as_ref(), "saved"),
        icon: non_blank(raw.icon.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_goal_normalizes() {
        let raw: RawGoal = serde_json::from_value(json!({
            "name": " Trip ",
            "target": 500,
            "saved": "250",
            "icon": "airplane"
        }))
        .unwrap();
        let goal = normalize_goal(raw);
        assert_eq!(goal.name, "Trip");
        assert_eq!(goal.target, 500.0);
        assert_eq!(goal.saved, 250.0);
        assert_eq!(goal.icon.as_deref(), Some("airplane"));
    }
}
