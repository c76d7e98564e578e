//! Loading and saving the streak aggregate.
//!
//! The aggregate lives in a single key-value slot as JSON. Loading is
//! best-effort: a missing, unreadable or malformed slot yields an empty
//! aggregate and a warning in the log. Saving always writes the whole value.

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::Result;
use crate::streak::StreaksData;

/// Slot holding the serialized [`StreaksData`].
pub const STREAKS_KEY: &str = "streaksData";

/// Slot holding the theme flag as `"true"` / `"false"`.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Reads and writes [`StreaksData`] through a [`KeyValueStore`].
pub struct StreakPersistence<K> {
    kv: K,
}

impl<K: KeyValueStore> StreakPersistence<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Load the aggregate, falling back to an empty one.
    pub fn load(&self) -> StreaksData {
        let raw = match self.kv.get(STREAKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved streaks, starting empty");
                return StreaksData::default();
            }
            Err(e) => {
                warn!(error = %e, "failed to read saved streaks, starting empty");
                return StreaksData::default();
            }
        };

        match serde_json::from_str::<StreaksData>(&raw) {
            Ok(data) => {
                debug!(streaks = data.streaks.len(), "loaded streaks");
                data
            }
            Err(e) => {
                warn!(error = %e, "failed to parse saved streaks, starting empty");
                StreaksData::default()
            }
        }
    }

    /// Overwrite the slot with the full aggregate.
    ///
    /// # Errors
    /// Returns an error if serialization or the underlying write fails.
    pub fn save(&self, data: &StreaksData) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.kv.set(STREAKS_KEY, &json)?;
        debug!(streaks = data.streaks.len(), bytes = json.len(), "saved streaks");
        Ok(())
    }
}

/// Dark-mode preference; anything other than the literal `"true"` is off.
pub fn load_dark_mode(kv: &impl KeyValueStore) -> bool {
    match kv.get(DARK_MODE_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!(error = %e, "failed to read dark mode preference");
            false
        }
    }
}

/// # Errors
/// Returns an error if the underlying write fails.
pub fn save_dark_mode(kv: &impl KeyValueStore, enabled: bool) -> Result<()> {
    kv.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}
