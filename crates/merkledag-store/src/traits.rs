use std::sync::Arc;

use merkledag_types::Hash;

use crate::error::StoreResult;

/// Hash-keyed byte store.
///
/// All implementations must satisfy these invariants:
/// - `put` is idempotent: writing an existing key again succeeds and leaves
///   the first value in place.
/// - The store never interprets values or verifies that a key matches its
///   value. Addressing is the writer's responsibility.
/// - All I/O errors are propagated, never silently ignored.
///
/// The DAG builder only ever calls [`put`](KvStore::put). `get` and `has`
/// exist for callers that inspect what was written.
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`.
    fn put(&self, key: &Hash, value: &[u8]) -> StoreResult<()>;

    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &Hash) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether a key exists.
    fn has(&self, key: &Hash) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn put(&self, key: &Hash, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &Hash) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &Hash) -> StoreResult<bool> {
        (**self).has(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn put(&self, key: &Hash, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &Hash) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &Hash) -> StoreResult<bool> {
        (**self).has(key)
    }
}
