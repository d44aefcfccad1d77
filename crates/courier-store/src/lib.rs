//! # courier-store
//!
//! Durable key-value preference storage for the courier messaging library.
//!
//! The core persists small configuration values here: the active framing
//! strategy tag and the registered received-listener identifier. Two
//! implementations are provided:
//!
//! - [`FileStore`]: one JSON document on disk, written atomically, durable
//!   across process restarts
//! - [`MemoryStore`]: volatile, for tests
//!
//! ```
//! use courier_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set_string("greeting", "hello").unwrap();
//! assert_eq!(store.get_string("greeting").as_deref(), Some("hello"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, StoreValue};
