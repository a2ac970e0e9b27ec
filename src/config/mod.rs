//! Persisted user settings.
//!
//! Settings are a single JSON blob kept under [`SETTINGS_KEY`] in a
//! [`KeyValueStore`]; the file-backed store writes atomically.

pub mod manager;
pub mod model;
pub mod store;

pub use manager::{SettingsManager, SETTINGS_KEY};
pub use model::{NotificationPrefs, Settings};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
