// Storage module - PERSISTENCE
// Contract key-value storage: the trait, a sled-backed store and an in-memory store

mod memory;
mod store;
mod traits;

pub use memory::MemoryStore;
pub use store::{GovStore, StorageStats};
pub use traits::{KvStore, StoreError, WriteBatch};
