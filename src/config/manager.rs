use std::cmp::Reverse;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::{KeyValueStore, Settings};
use crate::errors::{BuddyError, Result};

/// Key under which the settings blob is stored.
pub const SETTINGS_KEY: &str = "bb.settings.v1";
const BACKUP_PREFIX: &str = "bb.settings.v1.backup.";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Loads and saves [`Settings`] through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SettingsManager<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Settings> {
        match self.store.get(SETTINGS_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => {
                tracing::debug!("no stored settings, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        validate(settings)?;
        let blob = serde_json::to_string_pretty(settings)?;
        self.store.set(SETTINGS_KEY, &blob)?;
        tracing::info!(key = SETTINGS_KEY, "settings saved");
        Ok(())
    }

    /// Loads, applies `change`, and saves in one step.
    pub fn update<F>(&self, change: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.load()?;
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Snapshots the current settings under a timestamped key and returns the
    /// backup name.
    pub fn backup(&self, note: Option<&str>) -> Result<String> {
        let settings = self.load()?;
        let mut name = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        if let Some(label) = sanitize_note(note) {
            name.push('.');
            name.push_str(&label);
        }
        // Same-second backups with the same note get a numeric suffix.
        let base = name.clone();
        let mut attempt = 1;
        while self.store.get(&format!("{BACKUP_PREFIX}{name}"))?.is_some() {
            attempt += 1;
            name = format!("{base}.{attempt}");
        }
        let blob = serde_json::to_string_pretty(&settings)?;
        self.store.set(&format!("{BACKUP_PREFIX}{name}"), &blob)?;
        Ok(name)
    }

    /// Backup names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .keys(BACKUP_PREFIX)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(BACKUP_PREFIX).map(str::to_string))
            .collect();
        names.sort_by_key(|name| Reverse((parse_timestamp(name), backup_sequence(name))));
        Ok(names)
    }

    /// Makes a backup the active settings again.
    pub fn restore(&self, backup_name: &str) -> Result<Settings> {
        let key = format!("{BACKUP_PREFIX}{backup_name}");
        let blob = self
            .store
            .get(&key)?
            .ok_or_else(|| BuddyError::NotFound(format!("settings backup `{backup_name}`")))?;
        let settings: Settings = serde_json::from_str(&blob)?;
        self.save(&settings)?;
        Ok(settings)
    }
}

fn validate(settings: &Settings) -> Result<()> {
    if !settings.monthly_allowance.is_finite() || settings.monthly_allowance < 0.0 {
        return Err(BuddyError::Invalid(
            "monthly allowance must be a non-negative number".into(),
        ));
    }
    let pct = settings.notifications.near_limit_pct;
    if !(0.0..=100.0).contains(&pct) {
        return Err(BuddyError::Invalid(
            "near-limit threshold must be between 0 and 100".into(),
        ));
    }
    Ok(())
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Collision suffix of a backup name; `1` when there is none.
fn backup_sequence(name: &str) -> u32 {
    name.rsplit('.')
        .next()
        .filter(|_| name.contains('.'))
        .and_then(|tail| tail.parse().ok())
        .unwrap_or(1)
}

fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name.split('.').next()?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
