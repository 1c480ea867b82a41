use merkledag_store::StoreError;
use merkledag_types::Hash;
use thiserror::Error;

/// Errors from DAG construction.
///
/// An `add` either returns a root hash or one of these; there is no partial
/// result.
#[derive(Debug, Error)]
pub enum DagError {
    /// The store rejected a write. The object under `key` was not persisted.
    #[error("failed to store object {key}: {source}")]
    StoreWrite {
        key: Hash,
        #[source]
        source: StoreError,
    },

    /// A node is neither a file nor a directory.
    #[error("unsupported node kind '{kind}' for {name}")]
    UnsupportedNodeKind { name: String, kind: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a node's content or listing its children failed.
    #[error("failed to read {name}: {source}")]
    NodeRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("directory nesting exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Result alias for DAG operations.
pub type DagResult<T> = Result<T, DagError>;
