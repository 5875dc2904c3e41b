//! Store configuration.

use std::path::PathBuf;

/// Key under which the whole inventory is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "inventory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    /// Directory for file-backed storage. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Read `STOCKROOM_STORAGE_KEY` and `STOCKROOM_DATA_DIR`, defaulting each.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage_key = match lookup("STOCKROOM_STORAGE_KEY") {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            Some(_) => {
                tracing::warn!("STOCKROOM_STORAGE_KEY is blank; using default key");
                DEFAULT_STORAGE_KEY.to_string()
            }
            None => DEFAULT_STORAGE_KEY.to_string(),
        };

        let data_dir = lookup("STOCKROOM_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            storage_key,
            data_dir,
        }
    }
}
