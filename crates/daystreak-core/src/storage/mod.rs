mod config;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod persistence;

pub use config::{CalendarConfig, Config, StorageConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use persistence::{load_dark_mode, save_dark_mode, StreakPersistence, DARK_MODE_KEY, STREAKS_KEY};

use std::path::PathBuf;
use std::rc::Rc;

use crate::error::{ConfigError, Result};

/// A durable string slot per key, the shape of a browser's local storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Rc<K> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/daystreak[-dev]/` based on DAYSTREAK_ENV.
///
/// Set DAYSTREAK_ENV=dev to use the development data directory, or
/// DAYSTREAK_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYSTREAK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DAYSTREAK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("daystreak-dev")
            } else {
                base_dir.join("daystreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
