use merkledag_types::Hash;

/// Stateful digest used to address objects.
///
/// The hasher accumulates every byte passed to [`write`](Hasher::write) since
/// the last [`reset`](Hasher::reset). [`sum`](Hasher::sum) reports the digest
/// of that input without consuming it, so the same state can be summed more
/// than once.
///
/// A single hasher is threaded through a whole `add` call. Callers that hash
/// independent objects must reset between them; [`digest`](Hasher::digest)
/// does exactly that and is what the DAG builder uses.
pub trait Hasher {
    /// Append bytes to the digest input.
    fn write(&mut self, data: &[u8]);

    /// Digest of all bytes written since the last reset.
    fn sum(&self) -> Hash;

    /// Clear the accumulated input.
    fn reset(&mut self);

    /// Human-readable algorithm name (for logs and reports).
    fn algorithm(&self) -> &str;

    /// Hash one self-contained object: reset, write `data`, sum.
    fn digest(&mut self, data: &[u8]) -> Hash {
        self.reset();
        self.write(data);
        self.sum()
    }
}

impl<H: Hasher + ?Sized> Hasher for &mut H {
    fn write(&mut self, data: &[u8]) {
        (**self).write(data)
    }

    fn sum(&self) -> Hash {
        (**self).sum()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn algorithm(&self) -> &str {
        (**self).algorithm()
    }
}

impl<H: Hasher + ?Sized> Hasher for Box<H> {
    fn write(&mut self, data: &[u8]) {
        (**self).write(data)
    }

    fn sum(&self) -> Hash {
        (**self).sum()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn algorithm(&self) -> &str {
        (**self).algorithm()
    }
}

/// BLAKE3 implementation of [`Hasher`].
///
/// An optional domain tag (e.g. `"merkledag-v1"`) is fed to the digest
/// followed by `b":"` after every reset. Two stores built with different
/// domains never share addresses even for identical content.
///
/// Output is 32 bytes by default; [`with_output_len`](Self::with_output_len)
/// switches to BLAKE3's extendable output for wider or narrower digests.
#[derive(Clone)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
    domain: Option<String>,
    output_len: usize,
}

impl Blake3Hasher {
    /// Default digest width in bytes.
    pub const OUTPUT_LEN: usize = blake3::OUT_LEN;

    /// Plain BLAKE3 with a 32-byte output.
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
            domain: None,
            output_len: Self::OUTPUT_LEN,
        }
    }

    /// BLAKE3 with a domain tag prepended to every object digest.
    pub fn with_domain(domain: impl Into<String>) -> Self {
        let mut hasher = Self {
            inner: blake3::Hasher::new(),
            domain: Some(domain.into()),
            output_len: Self::OUTPUT_LEN,
        };
        hasher.reset();
        hasher
    }

    /// Change the digest width. Zero is rejected.
    pub fn with_output_len(mut self, len: usize) -> Result<Self, HasherError> {
        if len == 0 {
            return Err(HasherError::InvalidOutputLength(len));
        }
        self.output_len = len;
        Ok(self)
    }

    /// The domain tag, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Digest width in bytes.
    pub fn output_len(&self) -> usize {
        self.output_len
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Blake3Hasher {
    fn write(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn sum(&self) -> Hash {
        if self.output_len == Self::OUTPUT_LEN {
            return Hash::from(*self.inner.finalize().as_bytes());
        }
        let mut out = vec![0u8; self.output_len];
        self.inner.finalize_xof().fill(&mut out);
        Hash::from_digest(out)
    }

    fn reset(&mut self) {
        self.inner.reset();
        if let Some(domain) = &self.domain {
            self.inner.update(domain.as_bytes());
            self.inner.update(b":");
        }
    }

    fn algorithm(&self) -> &str {
        "blake3"
    }
}

impl std::fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake3Hasher")
            .field("domain", &self.domain)
            .field("output_len", &self.output_len)
            .finish()
    }
}

/// Errors from hasher construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("invalid output length: {0}")]
    InvalidOutputLength(usize),
}
