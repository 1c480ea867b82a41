use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use merkledag_types::Hash;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Directory-backed key-value store.
///
/// Each value lives in its own file at `<root>/<hex[0..2]>/<hex[2..]>`, the
/// same fan-out git uses for loose objects. Writes go to a temporary file in
/// `root` and are renamed into place, so a reader never observes a partially
/// written value.
#[derive(Debug)]
pub struct FileKvStore {
    root: PathBuf,
    read_only: bool,
}

impl FileKvStore {
    /// Open (creating if needed) a writable store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            read_only: false,
        })
    }

    /// Open an existing store for reads only. Every `put` fails with
    /// [`StoreError::ReadOnly`].
    pub fn open_read_only(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("store directory {} does not exist", root.display()),
            )));
        }
        Ok(Self {
            root,
            read_only: true,
        })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the file holding `key`.
    pub fn path_for(&self, key: &Hash) -> PathBuf {
        let hex = key.to_hex();
        if hex.len() > 2 {
            self.root.join(&hex[..2]).join(&hex[2..])
        } else {
            self.root.join(hex)
        }
    }

    /// Number of stored values. Walks the directory.
    pub fn object_count(&self) -> StoreResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                for inner in fs::read_dir(entry.path())? {
                    if inner?.file_type()?.is_file() {
                        count += 1;
                    }
                }
            } else if file_type.is_file() && !entry.file_name().to_string_lossy().starts_with('.') {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl KvStore for FileKvStore {
    fn put(&self, key: &Hash, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }

        let path = self.path_for(key);
        if path.try_exists()? {
            debug!(key = %key.short_hex(), "value already present");
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(key = %key.short_hex(), len = value.len(), "value written");
        Ok(())
    }

    fn get(&self, key: &Hash) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn has(&self, key: &Hash) -> StoreResult<bool> {
        Ok(self.path_for(key).try_exists()?)
    }
}
