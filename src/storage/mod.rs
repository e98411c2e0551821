// SPDX-License-Identifier: MPL-2.0
//! Durable key/value storage used to persist session identity.
//!
//! The session layer only sees the [`KeyValueStore`] trait, so it can run
//! against an in-memory map in tests and against a CBOR file on disk in the
//! application.

mod file;

pub use file::FileStore;

use std::collections::BTreeMap;

/// Minimal string key/value storage.
///
/// Writes are infallible from the caller's point of view: implementations
/// that can fail (disk I/O) log the failure and keep serving their in-memory
/// view.
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Removes `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// Non-persistent store backed by a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
