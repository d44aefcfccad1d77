//! File-backed store, durable across process restarts.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

use crate::error::Result;
use crate::store::{KeyValueStore, StoreValue};

/// A durable [`KeyValueStore`] persisting all values as one JSON document.
///
/// Every mutation rewrites the document through a temporary file and an
/// atomic rename, so a crash mid-write leaves the previous document intact.
/// A missing or unparsable document starts the store empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, StoreValue>>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing document cannot be read; an
    /// unparsable document is logged and discarded instead, since refusing
    /// to start over stale preferences would brick the library.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    warn!(path = %path.display(), %err, "discarding unparsable preference document");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &HashMap<String, StoreValue>) -> Result<()> {
        let raw = serde_json::to_vec_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&raw)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<StoreValue> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: StoreValue) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        self.flush(&values)
    }

    fn clear(&self) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.clear();
        self.flush(&values)
    }
}
