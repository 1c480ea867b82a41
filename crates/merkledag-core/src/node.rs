//! The input model: files and directories supplied by the caller.
//!
//! A [`Node`] is a tagged variant over the two capability sets the builder
//! understands. Sources that encounter something else (a symlink, a device)
//! report it as [`Node::Unsupported`] and the builder refuses it explicitly.
//!
//! [`MemFile`] and [`MemDir`] are in-memory nodes for tests and embedding.
//! Filesystem-backed nodes live in [`crate::fs`].

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::DagResult;

/// Iterator over a directory's immediate children.
pub type Children<'a> = Box<dyn Iterator<Item = DagResult<Node>> + 'a>;

/// A leaf node with byte content.
pub trait File {
    /// Entry name within the parent directory.
    fn name(&self) -> &str;

    /// Content length in bytes.
    fn size(&self) -> u64;

    /// The whole content. Held in memory for the duration of the add.
    fn bytes(&self) -> DagResult<Cow<'_, [u8]>>;
}

/// An internal node with children.
pub trait Dir {
    /// Entry name within the parent directory.
    fn name(&self) -> &str;

    /// Original size recorded in the parent's link.
    fn size(&self) -> u64;

    /// Iterate the immediate children. Every call starts from the first
    /// child; iteration order is the order links are recorded in.
    fn children(&self) -> DagResult<Children<'_>>;
}

/// Kind tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Dir,
    Unsupported,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A file or directory to add.
pub enum Node {
    File(Box<dyn File>),
    Dir(Box<dyn Dir>),
    /// Something that is neither, described by `kind` (e.g. `"symlink"`).
    Unsupported { name: String, kind: String },
}

impl Node {
    /// Wrap a file implementation.
    pub fn file(file: impl File + 'static) -> Self {
        Self::File(Box::new(file))
    }

    /// Wrap a directory implementation.
    pub fn dir(dir: impl Dir + 'static) -> Self {
        Self::Dir(Box::new(dir))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Dir(d) => d.name(),
            Self::Unsupported { name, .. } => name,
        }
    }

    /// Size recorded in the parent's link. Zero for unsupported nodes.
    pub fn size(&self) -> u64 {
        match self {
            Self::File(f) => f.size(),
            Self::Dir(d) => d.size(),
            Self::Unsupported { .. } => 0,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Dir(_) => NodeKind::Dir,
            Self::Unsupported { .. } => NodeKind::Unsupported,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("size", &self.size())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// In-memory nodes
// ---------------------------------------------------------------------------

/// File held entirely in memory. Cloning shares the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemFile {
    name: String,
    data: Bytes,
}

impl MemFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl File for MemFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn bytes(&self) -> DagResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&self.data[..]))
    }
}

/// Child of a [`MemDir`].
#[derive(Clone, Debug)]
pub enum MemEntry {
    File(MemFile),
    Dir(MemDir),
}

impl MemEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Dir(d) => &d.name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Self::File(f) => f.size(),
            Self::Dir(d) => d.size,
        }
    }
}

/// Directory held entirely in memory.
///
/// Children keep the order they were given in. The directory's size is the
/// total content size of every file below it.
#[derive(Clone, Debug)]
pub struct MemDir {
    name: String,
    entries: Arc<[MemEntry]>,
    size: u64,
}

impl MemDir {
    pub fn new(name: impl Into<String>, entries: Vec<MemEntry>) -> Self {
        let size: u64 = entries.iter().map(MemEntry::size).sum();
        Self {
            name: name.into(),
            entries: entries.into(),
            size,
        }
    }

    /// An empty directory.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn entries(&self) -> &[MemEntry] {
        &self.entries
    }
}

impl Dir for MemDir {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn children(&self) -> DagResult<Children<'_>> {
        Ok(Box::new(
            self.entries.iter().cloned().map(|e| Ok(Node::from(e))),
        ))
    }
}

impl From<MemFile> for MemEntry {
    fn from(file: MemFile) -> Self {
        Self::File(file)
    }
}

impl From<MemDir> for MemEntry {
    fn from(dir: MemDir) -> Self {
        Self::Dir(dir)
    }
}

impl From<MemFile> for Node {
    fn from(file: MemFile) -> Self {
        Self::file(file)
    }
}

impl From<MemDir> for Node {
    fn from(dir: MemDir) -> Self {
        Self::dir(dir)
    }
}

impl From<MemEntry> for Node {
    fn from(entry: MemEntry) -> Self {
        match entry {
            MemEntry::File(f) => f.into(),
            MemEntry::Dir(d) => d.into(),
        }
    }
}
