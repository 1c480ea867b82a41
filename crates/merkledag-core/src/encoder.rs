//! Hash-and-store for the two object shapes.
//!
//! Blobs are addressed by the hash of their raw bytes and stored raw. Trees
//! are addressed by the hash of their canonical encoding and stored encoded.
//! Either way the key written to the store is `H(value)`.

use merkledag_crypto::Hasher;
use merkledag_store::KvStore;
use merkledag_types::Hash;

use crate::error::{DagError, DagResult};
use crate::object::Tree;

/// Result of persisting one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Key the object was stored under.
    pub hash: Hash,
    /// Length of the stored value in bytes.
    pub stored_len: usize,
}

/// Hash a chunk of raw bytes and store it under that hash.
pub fn encode_blob<S, H>(store: &S, hasher: &mut H, chunk: &[u8]) -> DagResult<Encoded>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    persist(store, hasher, chunk)
}

/// Encode a tree canonically, hash the encoding, and store it.
pub fn encode_tree<S, H>(store: &S, hasher: &mut H, tree: &Tree) -> DagResult<Encoded>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    let bytes = tree.encode()?;
    persist(store, hasher, &bytes)
}

fn persist<S, H>(store: &S, hasher: &mut H, value: &[u8]) -> DagResult<Encoded>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    let hash = hasher.digest(value);
    store
        .put(&hash, value)
        .map_err(|source| DagError::StoreWrite {
            key: hash.clone(),
            source,
        })?;
    Ok(Encoded {
        hash,
        stored_len: value.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Link, LinkKind};
    use merkledag_crypto::Blake3Hasher;
    use merkledag_store::{InMemoryKvStore, StoreError, StoreResult};

    struct RejectingStore;

    impl KvStore for RejectingStore {
        fn put(&self, _key: &Hash, _value: &[u8]) -> StoreResult<()> {
            Err(StoreError::Backend("disk full".into()))
        }

        fn get(&self, _key: &Hash) -> StoreResult<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    #[test]
    fn blob_key_is_hash_of_raw_chunk() {
        let store = InMemoryKvStore::new();
        let mut hasher = Blake3Hasher::new();
        let encoded = encode_blob(&store, &mut hasher, b"hello").unwrap();
        assert_eq!(encoded.hash.as_bytes(), blake3::hash(b"hello").as_bytes());
        assert_eq!(encoded.stored_len, 5);
        assert_eq!(
            store.get(&encoded.hash).unwrap().as_deref(),
            Some(&b"hello"[..])
        );
    }

    #[test]
    fn tree_key_is_hash_of_encoding() {
        let store = InMemoryKvStore::new();
        let mut hasher = Blake3Hasher::new();
        let mut tree = Tree::new();
        tree.push(
            Link::new("a.txt", Blake3Hasher::new().digest(b"hello"), 5),
            LinkKind::Blob,
        );
        let encoded = encode_tree(&store, &mut hasher, &tree).unwrap();

        let stored = store.get(&encoded.hash).unwrap().unwrap();
        assert_eq!(stored, tree.encode().unwrap());
        assert_eq!(Blake3Hasher::new().digest(&stored), encoded.hash);
        assert_eq!(Tree::decode(&stored).unwrap(), tree);
    }

    #[test]
    fn empty_tree_differs_from_empty_blob() {
        let store = InMemoryKvStore::new();
        let mut hasher = Blake3Hasher::new();
        let blob = encode_blob(&store, &mut hasher, b"").unwrap();
        let tree = encode_tree(&store, &mut hasher, &Tree::new()).unwrap();
        assert_ne!(blob.hash, tree.hash);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn dirty_hasher_is_reset_before_hashing() {
        let store = InMemoryKvStore::new();
        let mut hasher = Blake3Hasher::new();
        hasher.write(b"stale input");
        let encoded = encode_blob(&store, &mut hasher, b"data").unwrap();
        assert_eq!(encoded.hash, Blake3Hasher::new().digest(b"data"));
    }

    #[test]
    fn store_failure_is_reported_with_key() {
        let mut hasher = Blake3Hasher::new();
        let err = encode_blob(&RejectingStore, &mut hasher, b"lost").unwrap_err();
        match err {
            DagError::StoreWrite { key, source } => {
                assert_eq!(key, Blake3Hasher::new().digest(b"lost"));
                assert!(matches!(source, StoreError::Backend(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
