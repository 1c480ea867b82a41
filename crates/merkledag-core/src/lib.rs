//! Merkle DAG construction.
//!
//! [`add`] walks a file/directory [`Node`], writes every object it derives
//! into a [`KvStore`](merkledag_store::KvStore), and returns the root hash.
//! Any change to any byte, name, or sibling order changes that root.
//!
//! # Object Model
//!
//! - **Blob**: one chunk of file bytes. Stored raw; its key is `H(chunk)`.
//! - **Chunk list**: a [`Tree`] whose links are the blobs of one file larger
//!   than the block size.
//! - **Tree**: a directory: ordered [`Link`]s to its children.
//!
//! Trees are stored as compact JSON, `{"links":[{"name","hash","size"}],"data"}`,
//! where `data` holds one marker per link (`blob`, `list`, `tree`). For every
//! stored object the key equals `H(stored bytes)`.
//!
//! # Modules
//!
//! - [`chunker`]: fixed-size splitting
//! - [`object`]: links, trees, and their canonical encoding
//! - [`encoder`]: hash-and-store for blobs and trees
//! - [`node`]: the input model plus in-memory nodes
//! - [`fs`]: nodes backed by a real filesystem path
//! - [`builder`]: the recursive `add`

pub mod builder;
pub mod chunker;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fs;
pub mod node;
pub mod object;

pub use builder::{add, add_with_config, AddStats, DagBuilder};
pub use chunker::{split, Chunker};
pub use config::{AddConfig, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_DEPTH};
pub use encoder::{encode_blob, encode_tree, Encoded};
pub use error::{DagError, DagResult};
pub use fs::{FsNode, FsOptions};
pub use node::{Children, Dir, File, MemDir, MemEntry, MemFile, Node, NodeKind};
pub use object::{Link, LinkKind, Tree};
