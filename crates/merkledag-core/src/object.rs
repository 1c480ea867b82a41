use serde::{Deserialize, Serialize};

use merkledag_types::Hash;

use crate::error::{DagError, DagResult};

/// What a link points at.
///
/// Recorded in a tree's `data` field as a 4-byte ASCII marker per link so a
/// reader can tell a chunk list from a directory without fetching it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// A single stored chunk of file bytes.
    Blob,
    /// The chunk list of a file larger than one block.
    List,
    /// A directory.
    Tree,
}

impl LinkKind {
    /// Width of every marker in bytes.
    pub const MARKER_LEN: usize = 4;

    /// The ASCII marker written into tree data.
    pub fn marker(&self) -> &'static [u8; 4] {
        match self {
            Self::Blob => b"blob",
            Self::List => b"list",
            Self::Tree => b"tree",
        }
    }

    /// Parse a single marker.
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"blob" => Some(Self::Blob),
            b"list" => Some(Self::List),
            b"tree" => Some(Self::Tree),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::List => write!(f, "list"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// A named, sized reference to a stored object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Entry name (file name, directory name, or the file name for chunks).
    pub name: String,
    /// Key of the referenced object.
    pub hash: Hash,
    /// Original size of the referenced content, not of its encoding.
    pub size: u64,
}

impl Link {
    /// Create a new link.
    pub fn new(name: impl Into<String>, hash: Hash, size: u64) -> Self {
        Self {
            name: name.into(),
            hash,
            size,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// An internal object: ordered links plus one kind marker per link.
///
/// Links keep insertion order. They are never sorted, so sibling order is
/// part of the tree's identity.
///
/// The canonical encoding is compact JSON with fields in declaration order:
///
/// ```text
/// {"links":[{"name":"a.txt","hash":"<hex>","size":5}],"data":"626c6f62"}
/// ```
///
/// An empty directory encodes as `{"links":[],"data":""}` and therefore never
/// collides with an empty blob.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub links: Vec<Link>,
    #[serde(with = "merkledag_types::hex_bytes")]
    pub data: Vec<u8>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link, recording its kind marker.
    pub fn push(&mut self, link: Link, kind: LinkKind) {
        self.links.push(link);
        self.data.extend_from_slice(kind.marker());
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the tree has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Look up the first link with the given name.
    pub fn get(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Kind of every link, in link order.
    pub fn kinds(&self) -> DagResult<Vec<LinkKind>> {
        if self.data.len() != self.links.len() * LinkKind::MARKER_LEN {
            return Err(DagError::Serialization(format!(
                "tree has {} links but {} marker bytes",
                self.links.len(),
                self.data.len()
            )));
        }
        self.data
            .chunks(LinkKind::MARKER_LEN)
            .map(|m| {
                LinkKind::from_marker(m).ok_or_else(|| {
                    DagError::Serialization(format!(
                        "unknown link marker {:?}",
                        String::from_utf8_lossy(m)
                    ))
                })
            })
            .collect()
    }

    /// Sum of link sizes.
    pub fn total_size(&self) -> u64 {
        self.links.iter().map(|l| l.size).sum()
    }

    /// Canonical byte encoding. The tree's key is the hash of these bytes.
    pub fn encode(&self) -> DagResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| DagError::Serialization(e.to_string()))
    }

    /// Parse a canonical encoding and check its markers.
    pub fn decode(bytes: &[u8]) -> DagResult<Self> {
        let tree: Self =
            serde_json::from_slice(bytes).map_err(|e| DagError::Serialization(e.to_string()))?;
        tree.kinds()?;
        Ok(tree)
    }
}
