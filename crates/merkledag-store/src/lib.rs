//! Key-value storage for merkledag objects.
//!
//! The DAG builder persists every object with a single `put(hash, bytes)`.
//! This crate defines that seam and ships two backends.
//!
//! # Storage Backends
//!
//! All backends implement the [`KvStore`] trait:
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileKvStore`] -- one file per object under a fan-out directory
//!
//! # Design Rules
//!
//! 1. Values are immutable once written: a second `put` of an existing key
//!    is a no-op.
//! 2. The store never interprets values and never recomputes keys.
//! 3. All I/O errors are propagated, never silently ignored.
//! 4. Retry policy, if any, belongs to a backend, not to callers.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKvStore;
pub use memory::InMemoryKvStore;
pub use traits::KvStore;
