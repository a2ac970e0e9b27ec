use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyCode, LocaleConfig, MoneyFormat};
use crate::insights::ratios::{DEFAULT_BURN_WINDOW_DAYS, DEFAULT_NEAR_LIMIT_PCT, DEFAULT_TOP_K};

/// User preferences persisted as one JSON blob under [`SETTINGS_KEY`](super::SETTINGS_KEY).
///
/// Every field has a default so blobs written by older builds keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "Settings::default_currency")]
    pub currency: String,
    #[serde(default = "Settings::default_locale")]
    pub locale: String,
    /// Monthly spending ceiling used for the allowance percentage.
    #[serde(default)]
    pub monthly_allowance: f64,
    #[serde(default)]
    pub notifications: NotificationPrefs,
    #[serde(default = "Settings::default_burn_window_days")]
    pub burn_window_days: i64,
    #[serde(default = "Settings::default_top_k")]
    pub top_k: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            monthly_allowance: 0.0,
            notifications: NotificationPrefs::default(),
            burn_window_days: Self::default_burn_window_days(),
            top_k: Self::default_top_k(),
        }
    }
}

impl Settings {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_burn_window_days() -> i64 {
        DEFAULT_BURN_WINDOW_DAYS
    }

    pub fn default_top_k() -> usize {
        DEFAULT_TOP_K
    }

    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(
            CurrencyCode::new(&self.currency),
            LocaleConfig::for_tag(&self.locale),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    #[serde(default = "enabled")]
    pub budget_alerts: bool,
    #[serde(default = "enabled")]
    pub goal_reminders: bool,
    /// Adds the trailing-week digest to alert output.
    #[serde(default)]
    pub weekly_summary: bool,
    /// Remaining-budget percentage below which a budget counts as near its limit.
    #[serde(default = "NotificationPrefs::default_near_limit_pct")]
    pub near_limit_pct: f64,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            budget_alerts: true,
            goal_reminders: true,
            weekly_summary: false,
            near_limit_pct: Self::default_near_limit_pct(),
        }
    }
}

impl NotificationPrefs {
    pub fn default_near_limit_pct() -> f64 {
        DEFAULT_NEAR_LIMIT_PCT
    }
}

fn enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_blob_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"monthlyAllowance": 250, "notifications": {"weeklySummary": true}}"#)
                .unwrap();
        assert_eq!(settings.monthly_allowance, 250.0);
        assert_eq!(settings.currency, "USD");
        assert!(settings.notifications.weekly_summary);
        assert!(settings.notifications.budget_alerts);
        assert_eq!(settings.notifications.near_limit_pct, 10.0);
        assert_eq!(settings.top_k, 3);
    }
}
