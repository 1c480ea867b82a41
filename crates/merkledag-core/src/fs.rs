//! Nodes backed by a real filesystem path.
//!
//! Directory children are listed in byte order of their file names, so the
//! platform's `read_dir` order never leaks into a hash. A directory's size is
//! the total length of the regular files below it.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{DagError, DagResult};
use crate::node::{Children, Dir, File, Node};

/// How filesystem entries that are neither files nor directories are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsOptions {
    /// Skip symlinks, sockets, FIFOs and devices instead of reporting them as
    /// unsupported nodes.
    pub skip_unsupported: bool,
}

/// Entry point for filesystem-backed nodes.
pub struct FsNode;

impl FsNode {
    /// Open `path` as a node. Symlinks are not followed.
    ///
    /// A root that is neither a file nor a directory is returned as
    /// [`Node::Unsupported`] even when `options.skip_unsupported` is set;
    /// skipping only applies to directory children.
    pub fn open(path: impl AsRef<Path>, options: FsOptions) -> DagResult<Node> {
        let path = path.as_ref();
        classify(path.to_path_buf(), root_name(path), options)
    }
}

fn root_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().into_owned();
    }
    fs::canonicalize(path)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.display().to_string())
}

fn classify(path: PathBuf, name: String, options: FsOptions) -> DagResult<Node> {
    let meta = fs::symlink_metadata(&path).map_err(|source| read_error(&path, source))?;
    let file_type = meta.file_type();

    if file_type.is_file() {
        return Ok(Node::file(FsFile {
            path,
            name,
            size: meta.len(),
        }));
    }
    if file_type.is_dir() {
        let size = dir_size(&path)?;
        return Ok(Node::dir(FsDir {
            path,
            name,
            size,
            options,
        }));
    }

    let kind = if file_type.is_symlink() {
        "symlink"
    } else {
        "special file"
    };
    Ok(Node::Unsupported {
        name: path.display().to_string(),
        kind: kind.into(),
    })
}

fn dir_size(path: &Path) -> DagResult<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|e| read_error(path, io::Error::from(e)))?;
        if entry.file_type().is_file() {
            let meta = entry
                .metadata()
                .map_err(|e| read_error(entry.path(), io::Error::from(e)))?;
            total += meta.len();
        }
    }
    Ok(total)
}

fn read_error(path: &Path, source: io::Error) -> DagError {
    DagError::NodeRead {
        name: path.display().to_string(),
        source,
    }
}

struct FsFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl File for FsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn bytes(&self) -> DagResult<Cow<'_, [u8]>> {
        let data = fs::read(&self.path).map_err(|source| read_error(&self.path, source))?;
        Ok(Cow::Owned(data))
    }
}

struct FsDir {
    path: PathBuf,
    name: String,
    size: u64,
    options: FsOptions,
}

impl Dir for FsDir {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn children(&self) -> DagResult<Children<'_>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(|source| read_error(&self.path, source))? {
            let entry = entry.map_err(|source| read_error(&self.path, source))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        let options = self.options;
        Ok(Box::new(entries.into_iter().filter_map(move |file_name| {
            let path = self.path.join(&file_name);
            let name = file_name.to_string_lossy().into_owned();
            match classify(path, name, options) {
                Ok(Node::Unsupported { name, kind }) if options.skip_unsupported => {
                    warn!(path = %name, kind = %kind, "skipping unsupported entry");
                    None
                }
                other => Some(other),
            }
        })))
    }
}
