use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Content address of a stored object.
///
/// A `Hash` is whatever digest the caller-supplied hasher produced for an
/// object's bytes. Its width is not fixed here: a 32-byte BLAKE3 digest and a
/// 64-byte extended digest are both valid hashes. Identical content hashed
/// with the same hasher always produces the same `Hash`.
///
/// Serialises as a lower-case hex string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(Vec<u8>);

impl Hash {
    /// Wrap a digest that has already been computed.
    pub fn from_digest(digest: impl Into<Vec<u8>>) -> Self {
        Self(digest.into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the hash, returning the digest bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Digest width in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length digest. Never a valid store key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Short hex representation (first 8 characters at most).
    pub fn short_hex(&self) -> String {
        let end = self.0.len().min(4);
        hex::encode(&self.0[..end])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.is_empty() {
            return Err(TypeError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Parse from a hex string, requiring an exact digest width.
    pub fn from_hex_exact(s: &str, len: usize) -> Result<Self, TypeError> {
        let hash = Self::from_hex(s)?;
        if hash.len() != len {
            return Err(TypeError::InvalidLength {
                expected: len,
                actual: hash.len(),
            });
        }
        Ok(hash)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.short_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Hash {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Hash> for Vec<u8> {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
