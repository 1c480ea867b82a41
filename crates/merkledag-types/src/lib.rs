//! Foundation types for merkledag.
//!
//! Every other merkledag crate depends on `merkledag-types`. It is kept
//! deliberately small: the digest type that addresses stored objects and the
//! hex encoding shared by every serialised form.
//!
//! # Key Types
//!
//! - [`Hash`]: Content address produced by a caller-supplied hasher
//! - [`hex_bytes`]: serde adapter encoding byte fields as lower-case hex

pub mod error;
pub mod hash;
pub mod hex_bytes;

pub use error::TypeError;
pub use hash::Hash;
