#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_buddy::{
    config::{FileKeyValueStore, SettingsManager},
    storage::JsonStore,
    utils::paths,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh home directory laid out the way the CLI expects.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store and settings manager backed by an isolated home directory.
pub fn setup_test_env() -> (PathBuf, JsonStore, SettingsManager<FileKeyValueStore>) {
    let home = temp_home();
    let store = JsonStore::new(paths::data_dir_in(&home)).expect("create json store");
    let settings = SettingsManager::new(
        FileKeyValueStore::new(paths::settings_dir_in(&home)).expect("create settings store"),
    );
    (home, store, settings)
}
