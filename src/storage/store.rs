// GovStore - Persistent key-value storage using sled
//
// Holds two kinds of data:
// - Contract records (candidate pool, applicants, abolish proposals)
// - The consensus validator list, under a key outside the contract's namespace

use crate::governance::CandidateEntry;
use crate::registry::{RegistryError, ValidatorRegistry};
use crate::storage::traits::{KvStore, StoreError, WriteBatch};
use std::path::Path;
use tracing::debug;

/// Key prefixes for organizing data
mod keys {
    pub const CONTRACT_PREFIX: &str = "contract:";
    pub const CONSENSUS_VALIDATORS: &[u8] = b"consensus:validators";
}

/// Statistics about the storage
#[derive(Clone, Debug)]
pub struct StorageStats {
    /// Number of keys in the database
    pub key_count: usize,
    /// Approximate disk size in bytes
    pub disk_size_bytes: u64,
}

/// Persistent store for the staking contract and its validator registry
///
/// Uses sled for crash-safe, embedded storage.
/// A committed batch lands in one sled batch.
pub struct GovStore {
    db: sled::Db,
}

impl GovStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.db.is_empty())
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StoreError> {
        Ok(StorageStats {
            key_count: self.db.len(),
            disk_size_bytes: self.db.size_on_disk().unwrap_or(0),
        })
    }

    // ========================================================================
    // RAW KEY-VALUE OPERATIONS
    // ========================================================================

    /// Put raw bytes
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    /// Get raw bytes
    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    /// List contract keys with a given prefix, without the namespace
    pub fn list_keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let full = contract_key(prefix);
        let mut out = Vec::new();
        for result in self.db.scan_prefix(full.as_bytes()) {
            let (key, _) = result?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|_| StoreError::InvalidUtf8(prefix.to_string()))?;
            if let Some(stripped) = key.strip_prefix(keys::CONTRACT_PREFIX) {
                out.push(stripped.to_string());
            }
        }
        Ok(out)
    }
}

fn contract_key(key: &str) -> String {
    format!("{}{}", keys::CONTRACT_PREFIX, key)
}

impl KvStore for GovStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.get_raw(contract_key(key).as_bytes())? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StoreError::InvalidUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut sled_batch = sled::Batch::default();
        let count = batch.len();
        for (key, value) in batch {
            let key = contract_key(&key);
            match value {
                Some(v) => sled_batch.insert(key.as_bytes(), v.as_bytes()),
                None => sled_batch.remove(key.as_bytes()),
            }
        }
        self.db.apply_batch(sled_batch)?;
        debug!(writes = count, "Committed storage batch");
        Ok(())
    }
}

impl ValidatorRegistry for GovStore {
    fn validators(&self) -> Result<Vec<CandidateEntry>, RegistryError> {
        let bytes = self
            .get_raw(keys::CONSENSUS_VALIDATORS)
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        match bytes {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RegistryError::Corrupt(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn replace(&self, validators: &[CandidateEntry]) -> Result<(), RegistryError> {
        let bytes =
            serde_json::to_vec(validators).map_err(|e| RegistryError::Corrupt(e.to_string()))?;
        self.put_raw(keys::CONSENSUS_VALIDATORS, &bytes)
            .map_err(|e| RegistryError::Unavailable(e.to_string()))
    }
}
