use serde::{Deserialize, Serialize};

use crate::error::{DagError, DagResult};

/// Default block size: files larger than this are chunked (256 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 256 * 1024;

/// Default limit on directory nesting below the root.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration for a single `add`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddConfig {
    /// Maximum chunk length in bytes. Files up to this size become one blob.
    pub block_size: usize,
    /// Deepest nesting accepted below the root node (the root is depth 0).
    pub max_depth: usize,
}

impl Default for AddConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AddConfig {
    /// Default configuration with a different block size.
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            ..Default::default()
        }
    }

    /// Reject configurations the builder cannot run with.
    pub fn validate(&self) -> DagResult<()> {
        if self.block_size == 0 {
            return Err(DagError::InvalidConfig(
                "block_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
