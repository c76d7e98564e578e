//! In-process key-value store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{DatabaseError, Result};

/// Key-value slots held in memory. Counts writes, and can be told to refuse
/// them, which lets callers observe write-through behavior.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one slot.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Make every subsequent write fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only.get() {
            return Err(DatabaseError::WriteFailed {
                key: key.to_string(),
                message: "store is read-only".to_string(),
            }
            .into());
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_successful_writes_only() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set_read_only(true);
        assert!(store.set("a", "2").is_err());
        assert_eq!(store.writes(), 1);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
