//! In-memory store, for tests and for hosts that manage persistence
//! themselves.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::store::{KeyValueStore, StoreValue};

/// A volatile [`KeyValueStore`] backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoreValue>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: StoreValue) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_roundtrip_per_type() {
        let store = MemoryStore::new();
        store.set_string("s", "value").unwrap();
        store.set_int("i", 42).unwrap();
        store.set_bool("b", true).unwrap();

        assert_eq!(store.get_string("s").as_deref(), Some("value"));
        assert_eq!(store.get_int("i"), Some(42));
        assert_eq!(store.get_bool("b"), Some(true));
    }

    #[test]
    fn missing_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_string("absent"), None);
        assert_eq!(store.get_int("absent"), None);
        assert_eq!(store.get_bool("absent"), None);
    }

    #[test]
    fn type_mismatch_reads_none() {
        let store = MemoryStore::new();
        store.set_int("i", 7).unwrap();
        assert_eq!(store.get_string("i"), None);
        assert_eq!(store.get_bool("i"), None);
    }

    #[test]
    fn remove_and_clear() {
        let store = MemoryStore::new();
        store.set_string("a", "1").unwrap();
        store.set_string("b", "2").unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get_string("a"), None);
        assert_eq!(store.get_string("b").as_deref(), Some("2"));

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn update_int_treats_missing_as_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.update_int("counter", 1).unwrap(), 1);
        assert_eq!(store.update_int("counter", 5).unwrap(), 6);
    }

    #[test]
    fn shift_int_wraps_through_cycle() {
        let store = MemoryStore::new();
        assert_eq!(store.shift_int("ring", 3).unwrap(), 1);
        assert_eq!(store.shift_int("ring", 3).unwrap(), 2);
        assert_eq!(store.shift_int("ring", 3).unwrap(), 3);
        assert_eq!(store.shift_int("ring", 3).unwrap(), 1);
    }

    #[test]
    fn shift_int_without_a_cycle_leaves_the_value_alone() {
        let store = MemoryStore::new();
        store.set_int("ring", 2).unwrap();
        assert_eq!(store.shift_int("ring", 0).unwrap(), 2);
        assert_eq!(store.shift_int("ring", -5).unwrap(), 2);
        assert_eq!(store.get_int("ring"), Some(2));
    }
}
