//! In-memory virtual file system for ossim.
//!
//! A single [`MemoryVfs`] owns the whole tree and the session's current
//! directory. Path strings are handled by the pure functions in [`path`].

pub mod path;

mod memory;

pub use memory::{Directory, File, MemoryVfs, Node};

use ossim_types::time::Timestamp;

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// Snapshot of one directory child, as returned by
/// [`MemoryVfs::list_children`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Byte length of the content; `None` for directories.
    pub size: Option<u64>,
    pub created: Timestamp,
    pub modified: Timestamp,
}

/// One hit from [`MemoryVfs::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMatch {
    /// Absolute path of the matching node.
    pub path: String,
    /// True when only the file content (not the name) matched.
    pub content_match: bool,
}
