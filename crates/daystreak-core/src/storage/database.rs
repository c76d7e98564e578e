//! SQLite-backed key-value storage.
//!
//! One `kv` table holds every persisted slot: the streak aggregate under
//! `streaksData` and the theme flag under `darkMode`.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use super::{data_dir, migrations, KeyValueStore};
use crate::error::{DatabaseError, Result};

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "daystreak.db";

/// SQLite database holding the key-value slots.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// On-disk location, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open the database at `~/.config/daystreak/daystreak.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DEFAULT_DATABASE_FILE);
        Self::open_at(path)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self {
            conn,
            path: Some(path),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, path: None };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv_get(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.kv_set(key, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn kv_set_overwrites_whole_value() {
        let db = Database::open_memory().unwrap();
        db.set("streaksData", r#"{"streaks":[]}"#).unwrap();
        db.set("streaksData", "{}").unwrap();
        assert_eq!(db.get("streaksData").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DATABASE_FILE);
        {
            let db = Database::open_at(&path).unwrap();
            db.set("darkMode", "true").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(db.path(), Some(path.as_path()));
    }
}
