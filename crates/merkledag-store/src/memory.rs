use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use merkledag_types::Hash;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// In-memory, HashMap-based key-value store.
///
/// Intended for tests and embedding. Values are held behind a `RwLock` for
/// safe concurrent access and are cloned on read/write.
pub struct InMemoryKvStore {
    values: RwLock<HashMap<Hash, Vec<u8>>>,
    puts: AtomicU64,
}

impl InMemoryKvStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            puts: AtomicU64::new(0),
        }
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored values.
    pub fn total_bytes(&self) -> u64 {
        self.values
            .read()
            .expect("lock poisoned")
            .values()
            .map(|v| v.len() as u64)
            .sum()
    }

    /// Number of successful `put` calls, duplicates included.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Remove all values from the store.
    pub fn clear(&self) {
        self.values.write().expect("lock poisoned").clear();
        self.puts.store(0, Ordering::Relaxed);
    }

    /// Return a sorted list of all keys in the store.
    pub fn all_keys(&self) -> Vec<Hash> {
        let map = self.values.read().expect("lock poisoned");
        let mut keys: Vec<Hash> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for InMemoryKvStore {
    fn put(&self, key: &Hash, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }
        let mut map = self.values.write().expect("lock poisoned");
        map.entry(key.clone()).or_insert_with(|| value.to_vec());
        self.puts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get(&self, key: &Hash) -> StoreResult<Option<Vec<u8>>> {
        let map = self.values.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn has(&self, key: &Hash) -> StoreResult<bool> {
        let map = self.values.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKvStore")
            .field("key_count", &self.len())
            .field("put_count", &self.put_count())
            .finish()
    }
}
