// Storage Traits and Core Types
// The contract's view of its durable key-value storage

use std::collections::btree_map;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Stored value is not valid UTF-8 at key '{0}'")]
    InvalidUtf8(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

/// A set of puts and deletes applied together
///
/// Later writes to the same key replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    writes: BTreeMap<String, Option<String>>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.writes.insert(key.into(), Some(value.into()));
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), None);
    }

    /// Look up a staged write: `Some(None)` means the key is staged for deletion
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.writes.get(key).map(|v| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.writes.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl IntoIterator for WriteBatch {
    type Item = (String, Option<String>);
    type IntoIter = btree_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// Durable string-keyed storage owned by the contract
///
/// A missing key loads as `None`; an empty value loads as `Some("")`.
pub trait KvStore {
    /// Load the value stored at `key`
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Apply every write in the batch atomically
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Store a single value
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.commit(batch)
    }

    /// Delete a single key
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.delete(key);
        self.commit(batch)
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }
}
