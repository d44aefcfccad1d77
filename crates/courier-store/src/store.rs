//! The key-value store abstraction and its value type.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A typed preference value.
///
/// Reading a key as the wrong type yields `None` rather than an error; a
/// caller asking for a string where an int lives is treated the same as a
/// missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

/// Durable string/int/bool storage keyed by name.
///
/// Implementations are safe to share across threads; writes are visible to
/// subsequent reads through the same instance, and durable implementations
/// survive process restarts.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`.
    fn get(&self, key: &str) -> Option<StoreValue>;

    /// Write the value for `key`, replacing any previous value.
    fn set(&self, key: &str, value: StoreValue) -> Result<()>;

    /// Remove the value for `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every stored value.
    fn clear(&self) -> Result<()>;

    /// Read a string value.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(StoreValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Write a string value.
    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, StoreValue::Str(value.to_string()))
    }

    /// Read an integer value.
    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(StoreValue::Int(i)) => Some(i),
            _ => None,
        }
    }

    /// Write an integer value.
    fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.set(key, StoreValue::Int(value))
    }

    /// Read a boolean value.
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(StoreValue::Bool(b)) => Some(b),
            _ => None,
        }
    }

    /// Write a boolean value.
    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, StoreValue::Bool(value))
    }

    /// Add `delta` to the integer at `key` (missing counts as zero) and
    /// return the new value.
    fn update_int(&self, key: &str, delta: i64) -> Result<i64> {
        let next = self.get_int(key).unwrap_or(0) + delta;
        self.set_int(key, next)?;
        Ok(next)
    }

    /// Advance the integer at `key` through the cycle `1..=max` and return
    /// the new value.
    ///
    /// A `max` below 1 leaves no valid cycle; the stored value is returned
    /// unchanged.
    fn shift_int(&self, key: &str, max: i64) -> Result<i64> {
        let current = self.get_int(key).unwrap_or(0);
        if max < 1 {
            return Ok(current);
        }
        let next = (current % max) + 1;
        self.set_int(key, next)?;
        Ok(next)
    }
}
