//! Hashing primitives for merkledag.
//!
//! The DAG builder is algorithm-agnostic: it talks to a stateful [`Hasher`]
//! (write, sum, reset) supplied by the caller. [`Blake3Hasher`] is the
//! implementation used by the CLI and the tests.
//!
//! Hashing is delegated to the `blake3` crate.

pub mod hasher;

pub use hasher::{Blake3Hasher, Hasher, HasherError};
