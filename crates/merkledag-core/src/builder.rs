//! Recursive DAG construction.
//!
//! The builder walks a [`Node`] depth-first, in the order each directory
//! yields its children, and writes one object per blob, chunk list, and
//! directory. Each call returns exactly one hash or an error.

use serde::Serialize;
use tracing::{debug, info};

use merkledag_crypto::Hasher;
use merkledag_store::KvStore;
use merkledag_types::Hash;

use crate::chunker::Chunker;
use crate::config::AddConfig;
use crate::encoder::{encode_blob, encode_tree};
use crate::error::{DagError, DagResult};
use crate::node::{Dir, File, Node};
use crate::object::{Link, LinkKind, Tree};

/// Counters for objects written by a builder.
///
/// Counts are per write, so content that appears twice is counted twice even
/// though the store keeps one copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AddStats {
    /// Blobs written (whole small files and chunks of large ones).
    pub blobs: u64,
    /// Chunk-list trees written for files larger than one block.
    pub chunk_lists: u64,
    /// Directory trees written.
    pub trees: u64,
    /// Total bytes handed to the store.
    pub bytes_stored: u64,
}

impl AddStats {
    /// Total objects written.
    pub fn objects(&self) -> u64 {
        self.blobs + self.chunk_lists + self.trees
    }
}

/// Hash a node with the default configuration, storing every object.
pub fn add<S, H>(store: &S, node: &Node, hasher: &mut H) -> DagResult<Hash>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    add_with_config(store, node, hasher, &AddConfig::default())
}

/// Hash a node with an explicit configuration, storing every object.
pub fn add_with_config<S, H>(
    store: &S,
    node: &Node,
    hasher: &mut H,
    config: &AddConfig,
) -> DagResult<Hash>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    DagBuilder::new(store, hasher, config.clone())?.add(node)
}

/// Reusable DAG builder holding a store, a hasher, and configuration.
///
/// Statistics accumulate across [`add`](Self::add) calls.
pub struct DagBuilder<S, H> {
    store: S,
    hasher: H,
    chunker: Chunker,
    config: AddConfig,
    stats: AddStats,
}

impl<S: KvStore, H: Hasher> DagBuilder<S, H> {
    /// Create a builder. Fails if the configuration is invalid.
    pub fn new(store: S, hasher: H, config: AddConfig) -> DagResult<Self> {
        config.validate()?;
        let chunker = Chunker::new(config.block_size)?;
        Ok(Self {
            store,
            hasher,
            chunker,
            config,
            stats: AddStats::default(),
        })
    }

    /// Add a node and return its root hash.
    pub fn add(&mut self, node: &Node) -> DagResult<Hash> {
        let before = self.stats;
        let (hash, _) = self.add_node(node, 0)?;
        info!(
            root = %hash.short_hex(),
            name = node.name(),
            algorithm = self.hasher.algorithm(),
            objects = self.stats.objects() - before.objects(),
            bytes = self.stats.bytes_stored - before.bytes_stored,
            "add complete"
        );
        Ok(hash)
    }

    pub fn stats(&self) -> AddStats {
        self.stats
    }

    pub fn config(&self) -> &AddConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store and hasher.
    pub fn into_parts(self) -> (S, H) {
        (self.store, self.hasher)
    }

    fn add_node(&mut self, node: &Node, depth: usize) -> DagResult<(Hash, LinkKind)> {
        if depth > self.config.max_depth {
            return Err(DagError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        match node {
            Node::File(file) => self.add_file(file.as_ref()),
            Node::Dir(dir) => {
                let hash = self.add_dir(dir.as_ref(), depth)?;
                Ok((hash, LinkKind::Tree))
            }
            Node::Unsupported { name, kind } => Err(DagError::UnsupportedNodeKind {
                name: name.clone(),
                kind: kind.clone(),
            }),
        }
    }

    fn add_file(&mut self, file: &dyn File) -> DagResult<(Hash, LinkKind)> {
        let data = file.bytes()?;

        if data.len() <= self.chunker.block_size() {
            let encoded = encode_blob(&self.store, &mut self.hasher, &data)?;
            self.stats.blobs += 1;
            self.stats.bytes_stored += encoded.stored_len as u64;
            return Ok((encoded.hash, LinkKind::Blob));
        }

        let mut list = Tree::new();
        for chunk in self.chunker.split(&data) {
            let encoded = encode_blob(&self.store, &mut self.hasher, chunk)?;
            self.stats.blobs += 1;
            self.stats.bytes_stored += encoded.stored_len as u64;
            list.push(
                Link::new(file.name(), encoded.hash, chunk.len() as u64),
                LinkKind::Blob,
            );
        }

        let encoded = encode_tree(&self.store, &mut self.hasher, &list)?;
        self.stats.chunk_lists += 1;
        self.stats.bytes_stored += encoded.stored_len as u64;
        debug!(
            name = file.name(),
            size = data.len(),
            chunks = list.len(),
            hash = %encoded.hash.short_hex(),
            "stored chunk list"
        );
        Ok((encoded.hash, LinkKind::List))
    }

    fn add_dir(&mut self, dir: &dyn Dir, depth: usize) -> DagResult<Hash> {
        let mut tree = Tree::new();
        for child in dir.children()? {
            let child = child?;
            let (hash, kind) = self.add_node(&child, depth + 1)?;
            tree.push(Link::new(child.name(), hash, child.size()), kind);
        }

        let encoded = encode_tree(&self.store, &mut self.hasher, &tree)?;
        self.stats.trees += 1;
        self.stats.bytes_stored += encoded.stored_len as u64;
        debug!(
            name = dir.name(),
            entries = tree.len(),
            hash = %encoded.hash.short_hex(),
            "stored tree"
        );
        Ok(encoded.hash)
    }
}
