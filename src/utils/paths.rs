use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".budget_buddy";
const DATA_DIR: &str = "data";
const SETTINGS_DIR: &str = "settings";

/// Returns the application data directory, defaulting to `~/.budget_buddy`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUDGET_BUDDY_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the transaction, budget, and goal files under `base`.
pub fn data_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_DIR)
}

/// Directory backing the settings key-value store under `base`.
pub fn settings_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(SETTINGS_DIR)
}
