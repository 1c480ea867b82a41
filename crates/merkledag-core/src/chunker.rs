//! Fixed-size chunker for splitting file content into blobs.

use crate::error::{DagError, DagResult};

/// Split `data` into contiguous pieces of `block_size` bytes.
///
/// Every piece is exactly `block_size` long except the last, which holds the
/// remainder. Empty input produces no pieces. A zero block size is rejected.
pub fn split(data: &[u8], block_size: usize) -> DagResult<Vec<&[u8]>> {
    Ok(Chunker::new(block_size)?.split(data))
}

/// Fixed-size chunker with a validated, non-zero block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunker {
    block_size: usize,
}

impl Chunker {
    /// Create a chunker. Fails for a zero block size.
    pub fn new(block_size: usize) -> DagResult<Self> {
        if block_size == 0 {
            return Err(DagError::InvalidConfig(
                "block_size must be greater than zero".into(),
            ));
        }
        Ok(Self { block_size })
    }

    /// The configured block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Split data into borrowed fixed-size pieces.
    pub fn split<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        data.chunks(self.block_size).collect()
    }

    /// Number of pieces `split` yields for `len` bytes.
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split(&[], 4).unwrap().is_empty());
    }

    #[test]
    fn exact_block_is_one_chunk() {
        let data = [7u8; 4];
        let chunks = split(&data, 4).unwrap();
        assert_eq!(chunks, vec![&data[..]]);
    }

    #[test]
    fn one_over_block_is_two_chunks() {
        let data = [1u8, 2, 3, 4, 5];
        let chunks = split(&data, 4).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], &[1, 2, 3, 4]);
        assert_eq!(chunks[1], &[5]);
    }

    #[test]
    fn shorter_than_block_is_one_chunk() {
        let chunks = split(b"abc", 16).unwrap();
        assert_eq!(chunks, vec![&b"abc"[..]]);
    }

    #[test]
    fn zero_block_size_rejected() {
        assert!(matches!(split(b"abc", 0), Err(DagError::InvalidConfig(_))));
        assert!(Chunker::new(0).is_err());
    }

    #[test]
    fn default_block_scenario() {
        // 300 KiB of zeros against 256 KiB blocks: 256 KiB + 44 KiB.
        let data = vec![0u8; 300 * 1024];
        let chunks = split(&data, 256 * 1024).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 256 * 1024);
        assert_eq!(chunks[1].len(), 44 * 1024);
    }

    #[test]
    fn chunk_count_matches_split() {
        let chunker = Chunker::new(4).unwrap();
        assert_eq!(chunker.chunk_count(0), 0);
        assert_eq!(chunker.chunk_count(4), 1);
        assert_eq!(chunker.chunk_count(5), 2);
        assert_eq!(chunker.chunk_count(8), 2);
    }

    proptest! {
        #[test]
        fn chunks_reassemble_to_input(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            block in 1usize..64,
        ) {
            let chunks = split(&data, block).unwrap();
            prop_assert_eq!(chunks.concat(), data.clone());
            prop_assert_eq!(chunks.len(), Chunker::new(block).unwrap().chunk_count(data.len()));
        }

        #[test]
        fn only_last_chunk_may_be_short(
            data in proptest::collection::vec(any::<u8>(), 1..512),
            block in 1usize..64,
        ) {
            let chunks = split(&data, block).unwrap();
            let (last, rest) = chunks.split_last().unwrap();
            prop_assert!(rest.iter().all(|c| c.len() == block));
            prop_assert!(!last.is_empty() && last.len() <= block);
            let expected_last = if data.len() % block == 0 { block } else { data.len() % block };
            prop_assert_eq!(last.len(), expected_last);
        }
    }
}
