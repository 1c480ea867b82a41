/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempted to write under an empty key.
    #[error("cannot store value under an empty key")]
    InvalidKey,

    /// Storage backend is read-only.
    #[error("store is read-only")]
    ReadOnly,

    /// Any other backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
