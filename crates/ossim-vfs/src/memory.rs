//! In-memory tree filesystem.
//!
//! Every directory exclusively owns its children; there are no parent
//! back-references. All operations walk the tree top-down from the root, so a
//! node can never be attached below itself.

use std::collections::BTreeMap;

use ossim_types::error::{OssimError, Result};
use ossim_types::time::Timestamp;

use crate::path;
use crate::{EntryKind, FindMatch, VfsEntry};

/// A file or directory in the tree. The node's name is its key in the
/// parent's child map.
#[derive(Debug, Clone)]
pub enum Node {
    Directory(Directory),
    File(File),
}

impl Node {
    pub fn kind(&self) -> EntryKind {
        match self {
            Node::Directory(_) => EntryKind::Directory,
            Node::File(_) => EntryKind::File,
        }
    }

    pub fn created(&self) -> Timestamp {
        match self {
            Node::Directory(d) => d.created,
            Node::File(f) => f.created,
        }
    }

    pub fn modified(&self) -> Timestamp {
        match self {
            Node::Directory(d) => d.modified,
            Node::File(f) => f.modified,
        }
    }
}

/// A directory and its exclusively owned children.
#[derive(Debug, Clone)]
pub struct Directory {
    children: BTreeMap<String, Node>,
    created: Timestamp,
    modified: Timestamp,
}

impl Directory {
    fn new(now: Timestamp) -> Self {
        Self {
            children: BTreeMap::new(),
            created: now,
            modified: now,
        }
    }

    /// Look up a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Children in lexicographic name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn modified(&self) -> Timestamp {
        self.modified
    }

    /// Insert a fresh child, stamping this directory as modified.
    fn insert(&mut self, name: &str, node: Node, now: Timestamp) -> Result<()> {
        validate_name(name)?;
        if self.children.contains_key(name) {
            return Err(OssimError::AlreadyExists(format!("already exists: {name}")));
        }
        self.children.insert(name.to_string(), node);
        self.modified = now;
        Ok(())
    }
}

/// A file. Its size is always the byte length of its content.
#[derive(Debug, Clone)]
pub struct File {
    content: String,
    created: Timestamp,
    modified: Timestamp,
}

impl File {
    fn new(content: &str, now: Timestamp) -> Self {
        Self {
            content: content.to_string(),
            created: now,
            modified: now,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn modified(&self) -> Timestamp {
        self.modified
    }
}

/// Reject names that could not be addressed by a path.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(OssimError::InvalidArgument("name must not be empty".to_string()));
    }
    if name.contains('/') {
        return Err(OssimError::InvalidArgument(format!(
            "invalid name '{name}': must not contain '/'"
        )));
    }
    if name == "." || name == ".." {
        return Err(OssimError::InvalidArgument(format!(
            "invalid name '{name}': reserved"
        )));
    }
    Ok(())
}

/// A fully in-memory virtual file system plus the session's current
/// directory.
#[derive(Debug, Clone)]
pub struct MemoryVfs {
    root: Directory,
    cwd: String,
}

impl MemoryVfs {
    /// Create a filesystem with only the root directory; cwd is `/`.
    pub fn new() -> Self {
        Self {
            root: Directory::new(Timestamp::now()),
            cwd: "/".to_string(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// The session's current directory (canonical absolute path).
    pub fn current_dir(&self) -> &str {
        &self.cwd
    }

    /// Resolve a user-supplied path against the current directory.
    pub fn resolve(&self, raw: &str) -> String {
        path::normalize(&self.cwd, raw)
    }

    /// Walk from the root to the directory at `path`. `None` if any segment
    /// is missing or is a file.
    pub fn navigate(&self, path: &str) -> Option<&Directory> {
        let mut current = &self.root;
        for segment in path::segments(path) {
            match current.children.get(segment) {
                Some(Node::Directory(dir)) => current = dir,
                _ => return None,
            }
        }
        Some(current)
    }

    fn navigate_mut(&mut self, path: &str) -> Option<&mut Directory> {
        let mut current = &mut self.root;
        for segment in path::segments(path) {
            match current.children.get_mut(segment) {
                Some(Node::Directory(dir)) => current = dir,
                _ => return None,
            }
        }
        Some(current)
    }

    /// The node at `path`, file or directory. Root is not a keyed child and
    /// yields `None`; use [`MemoryVfs::root`] for it.
    pub fn node(&self, path: &str) -> Option<&Node> {
        let name = path::base_name(path);
        if name.is_empty() {
            return None;
        }
        self.navigate(&path::parent_of(path))?.children.get(name)
    }

    /// Whether `path` names an existing node (root included).
    pub fn exists(&self, path: &str) -> bool {
        path::segments(path).next().is_none() || self.node(path).is_some()
    }

    /// Create an empty directory `name` under `parent`.
    pub fn create_directory(&mut self, parent: &str, name: &str) -> Result<()> {
        let now = Timestamp::now();
        let dir = self
            .navigate_mut(parent)
            .ok_or_else(|| OssimError::NotFound(format!("no such directory: {parent}")))?;
        dir.insert(name, Node::Directory(Directory::new(now)), now)
    }

    /// Create a file `name` under `parent` holding `content`.
    pub fn create_file(&mut self, parent: &str, name: &str, content: &str) -> Result<()> {
        let now = Timestamp::now();
        let dir = self
            .navigate_mut(parent)
            .ok_or_else(|| OssimError::NotFound(format!("no such directory: {parent}")))?;
        dir.insert(name, Node::File(File::new(content, now)), now)
    }

    /// Detach the node at `path` (with its whole subtree) and report what it
    /// was. Root is never deletable.
    pub fn delete_node(&mut self, path: &str) -> Result<EntryKind> {
        let name = path::base_name(path);
        if name.is_empty() {
            return Err(OssimError::PermissionDenied(
                "cannot remove root directory".to_string(),
            ));
        }
        let parent_path = path::parent_of(path);
        let parent = self
            .navigate_mut(&parent_path)
            .ok_or_else(|| OssimError::NotFound(format!("no such path: {path}")))?;
        let removed = parent
            .children
            .remove(name)
            .ok_or_else(|| OssimError::NotFound(format!("no such path: {path}")))?;
        parent.modified = Timestamp::now();
        let removed_path = path::join(&parent_path, name);
        if self.cwd_suffix(&removed_path).is_some() {
            log::debug!("Current directory {} removed, moving to {parent_path}", self.cwd);
            self.cwd = parent_path;
        }
        Ok(removed.kind())
    }

    /// Content of the file at `path`, or `None` if it is not a file.
    pub fn read_file(&self, path: &str) -> Option<&str> {
        match self.node(path)? {
            Node::File(file) => Some(file.content()),
            Node::Directory(_) => None,
        }
    }

    /// Replace the content of an existing file.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<()> {
        let name = path::base_name(path);
        let parent = self
            .navigate_mut(&path::parent_of(path))
            .ok_or_else(|| OssimError::NotFound(format!("no such file: {path}")))?;
        match parent.children.get_mut(name) {
            Some(Node::File(file)) => {
                file.content = content.to_string();
                file.modified = Timestamp::now();
                Ok(())
            },
            Some(Node::Directory(_)) => Err(OssimError::InvalidArgument(format!(
                "is a directory: {path}"
            ))),
            None => Err(OssimError::NotFound(format!("no such file: {path}"))),
        }
    }

    /// Re-key the node at `path` to `new_name` within the same parent. The
    /// node itself (content, timestamps, subtree) is moved untouched.
    pub fn rename_node(&mut self, path: &str, new_name: &str) -> Result<()> {
        let name = path::base_name(path);
        if name.is_empty() {
            return Err(OssimError::PermissionDenied(
                "cannot rename root directory".to_string(),
            ));
        }
        validate_name(new_name)?;
        let parent_path = path::parent_of(path);
        let parent = self
            .navigate_mut(&parent_path)
            .ok_or_else(|| OssimError::NotFound(format!("no such path: {path}")))?;
        if !parent.children.contains_key(name) {
            return Err(OssimError::NotFound(format!("no such path: {path}")));
        }
        if parent.children.contains_key(new_name) {
            return Err(OssimError::AlreadyExists(format!(
                "already exists: {new_name}"
            )));
        }
        if let Some(node) = parent.children.remove(name) {
            parent.children.insert(new_name.to_string(), node);
        }
        parent.modified = Timestamp::now();
        let old_path = path::join(&parent_path, name);
        if let Some(rest) = self.cwd_suffix(&old_path) {
            self.cwd = format!("{}{rest}", path::join(&parent_path, new_name));
        }
        Ok(())
    }

    /// If the current directory is `dir` or lies below it, the remainder of
    /// the cwd after `dir` (empty or starting with `/`).
    fn cwd_suffix(&self, dir: &str) -> Option<String> {
        let rest = self.cwd.strip_prefix(dir)?;
        (rest.is_empty() || rest.starts_with('/')).then(|| rest.to_string())
    }

    /// Snapshot of the children of the directory at `path`, directories
    /// first, then by name.
    pub fn list_children(&self, path: &str) -> Option<Vec<VfsEntry>> {
        let dir = self.navigate(path)?;
        let mut entries: Vec<VfsEntry> = dir
            .children()
            .map(|(name, node)| VfsEntry {
                name: name.to_string(),
                kind: node.kind(),
                size: match node {
                    Node::File(file) => Some(file.size()),
                    Node::Directory(_) => None,
                },
                created: node.created(),
                modified: node.modified(),
            })
            .collect();
        // Stable sort keeps the BTreeMap name order within each kind.
        entries.sort_by_key(|e| e.kind != EntryKind::Directory);
        Some(entries)
    }

    /// Make `path` (resolved against the current directory) the current
    /// directory if it is an existing directory.
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path);
        if self.navigate(&target).is_none() {
            return Err(OssimError::NotFound(format!("no such directory: {target}")));
        }
        self.cwd = target;
        Ok(())
    }

    /// Recursively search below `start` for names (and file contents)
    /// containing `pattern`. `None` if `start` is not a directory.
    pub fn find(&self, start: &str, pattern: &str) -> Option<Vec<FindMatch>> {
        let dir = self.navigate(start)?;
        let mut results = Vec::new();
        find_recursive(dir, &path::canonicalize(start), pattern, &mut results);
        Some(results)
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

fn find_recursive(dir: &Directory, dir_path: &str, pattern: &str, results: &mut Vec<FindMatch>) {
    let mut children: Vec<(&str, &Node)> = dir.children().collect();
    children.sort_by_key(|(_, node)| node.kind() != EntryKind::Directory);
    for (name, node) in children {
        let full = path::join(dir_path, name);
        let name_match = name.contains(pattern);
        if name_match {
            results.push(FindMatch {
                path: full.clone(),
                content_match: false,
            });
        }
        match node {
            Node::File(file) if !name_match && file.content().contains(pattern) => {
                results.push(FindMatch {
                    path: full,
                    content_match: true,
                });
            },
            Node::Directory(sub) => find_recursive(sub, &full, pattern, results),
            Node::File(_) => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ossim_types::error::ErrorKind;

    fn vfs_with_a() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.create_directory("/", "a").unwrap();
        vfs
    }

    #[test]
    fn root_exists() {
        let vfs = MemoryVfs::new();
        assert!(vfs.exists("/"));
        assert!(vfs.navigate("/").is_some());
        assert_eq!(vfs.current_dir(), "/");
    }

    #[test]
    fn create_then_read_round_trip() {
        let mut vfs = vfs_with_a();
        vfs.create_file("/a", "f", "x").unwrap();
        assert_eq!(vfs.read_file("/a/f"), Some("x"));
        vfs.write_file("/a/f", "yz").unwrap();
        assert_eq!(vfs.read_file("/a/f"), Some("yz"));
        match vfs.node("/a/f") {
            Some(Node::File(f)) => assert_eq!(f.size(), 2),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_create_rejected() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "dup", "").unwrap();
        let err = vfs.create_file("/", "dup", "other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        let err = vfs.create_directory("/", "dup").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(vfs.root().len(), 1);
        assert_eq!(vfs.read_file("/dup"), Some(""));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "Readme", "").unwrap();
        vfs.create_file("/", "readme", "").unwrap();
        assert_eq!(vfs.root().len(), 2);
    }

    #[test]
    fn create_under_missing_parent_fails() {
        let mut vfs = MemoryVfs::new();
        let err = vfs.create_file("/nope", "f", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn create_under_file_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "f", "").unwrap();
        assert!(vfs.create_directory("/f", "d").is_err());
        assert!(vfs.navigate("/f").is_none());
    }

    #[test]
    fn invalid_names_rejected() {
        let mut vfs = MemoryVfs::new();
        for name in ["", "a/b", ".", ".."] {
            let err = vfs.create_directory("/", name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "name {name:?}");
        }
        assert!(vfs.root().is_empty());
    }

    #[test]
    fn create_updates_parent_modified() {
        let mut vfs = vfs_with_a();
        let before = vfs.navigate("/a").unwrap().modified();
        vfs.create_file("/a", "f", "").unwrap();
        let dir = vfs.navigate("/a").unwrap();
        assert!(dir.modified() >= before);
        assert!(dir.modified() >= dir.created());
    }

    #[test]
    fn delete_missing_is_idempotent_failure() {
        let mut vfs = vfs_with_a();
        for _ in 0..2 {
            let err = vfs.delete_node("/missing").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
        assert_eq!(vfs.root().len(), 1);
    }

    #[test]
    fn delete_root_denied() {
        let mut vfs = MemoryVfs::new();
        let err = vfs.delete_node("/").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(vfs.exists("/"));
    }

    #[test]
    fn delete_reports_kind_and_removes_subtree() {
        let mut vfs = vfs_with_a();
        vfs.create_file("/a", "f", "data").unwrap();
        vfs.create_file("/", "top", "").unwrap();
        assert_eq!(vfs.delete_node("/top").unwrap(), EntryKind::File);
        assert_eq!(vfs.delete_node("/a").unwrap(), EntryKind::Directory);
        assert!(!vfs.exists("/a/f"));
        assert!(vfs.root().is_empty());
    }

    #[test]
    fn deleting_cwd_moves_to_parent() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/a", "b").unwrap();
        vfs.change_directory("/a/b").unwrap();
        vfs.delete_node("/a").unwrap();
        assert_eq!(vfs.current_dir(), "/");
        assert!(vfs.navigate(vfs.current_dir()).is_some());
    }

    #[test]
    fn deleting_sibling_keeps_cwd() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/", "ab").unwrap();
        vfs.change_directory("/ab").unwrap();
        vfs.delete_node("/a").unwrap();
        assert_eq!(vfs.current_dir(), "/ab");
    }

    #[test]
    fn renaming_cwd_ancestor_follows() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/a", "b").unwrap();
        vfs.change_directory("/a/b").unwrap();
        vfs.rename_node("/a", "z").unwrap();
        assert_eq!(vfs.current_dir(), "/z/b");
        assert!(vfs.navigate(vfs.current_dir()).is_some());
    }

    #[test]
    fn read_directory_is_none() {
        let vfs = vfs_with_a();
        assert_eq!(vfs.read_file("/a"), None);
        assert_eq!(vfs.read_file("/missing"), None);
        assert_eq!(vfs.read_file("/"), None);
    }

    #[test]
    fn write_missing_or_directory_fails() {
        let mut vfs = vfs_with_a();
        assert_eq!(
            vfs.write_file("/nope", "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            vfs.write_file("/a", "x").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn write_updates_file_modified() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "f", "").unwrap();
        let before = vfs.node("/f").unwrap().modified();
        vfs.write_file("/f", "abc").unwrap();
        let node = vfs.node("/f").unwrap();
        assert!(node.modified() >= before);
        assert_eq!(node.created(), before);
    }

    #[test]
    fn rename_collision_leaves_both_entries() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "a.txt", "A").unwrap();
        vfs.create_file("/", "b.txt", "B").unwrap();
        let err = vfs.rename_node("/a.txt", "b.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(vfs.read_file("/a.txt"), Some("A"));
        assert_eq!(vfs.read_file("/b.txt"), Some("B"));
    }

    #[test]
    fn rename_preserves_node() {
        let mut vfs = vfs_with_a();
        vfs.create_file("/a", "inner", "keep").unwrap();
        let created = vfs.node("/a").unwrap().created();
        vfs.rename_node("/a", "b").unwrap();
        assert!(!vfs.exists("/a"));
        assert_eq!(vfs.read_file("/b/inner"), Some("keep"));
        assert_eq!(vfs.node("/b").unwrap().created(), created);
    }

    #[test]
    fn rename_root_or_missing_fails() {
        let mut vfs = MemoryVfs::new();
        assert_eq!(
            vfs.rename_node("/", "x").unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            vfs.rename_node("/ghost", "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn list_sorted_directories_first() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "b.txt", "bb").unwrap();
        vfs.create_directory("/", "zeta").unwrap();
        vfs.create_file("/", "a.txt", "").unwrap();
        vfs.create_directory("/", "alpha").unwrap();
        let entries = vfs.list_children("/").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "a.txt", "b.txt"]);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[3].size, Some(2));
    }

    #[test]
    fn list_non_directory_is_none() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "f", "").unwrap();
        assert!(vfs.list_children("/f").is_none());
        assert!(vfs.list_children("/missing").is_none());
    }

    #[test]
    fn change_directory_success_and_failure() {
        let mut vfs = vfs_with_a();
        vfs.create_file("/", "f", "").unwrap();
        vfs.change_directory("/a/").unwrap();
        assert_eq!(vfs.current_dir(), "/a");
        assert!(vfs.change_directory("/f").is_err());
        assert!(vfs.change_directory("/missing").is_err());
        assert_eq!(vfs.current_dir(), "/a");
        vfs.change_directory("/").unwrap();
        assert_eq!(vfs.current_dir(), "/");
    }

    #[test]
    fn change_directory_relative() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/a", "b").unwrap();
        vfs.change_directory("a").unwrap();
        vfs.change_directory("b").unwrap();
        assert_eq!(vfs.current_dir(), "/a/b");
    }

    #[test]
    fn dotdot_inside_path_does_not_resolve() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/a", "b").unwrap();
        let target = path::normalize("/a/b", "../b");
        assert!(vfs.navigate(&target).is_none());
    }

    #[test]
    fn navigate_is_repeatable() {
        let mut vfs = vfs_with_a();
        vfs.create_directory("/a", "b").unwrap();
        let p = path::normalize("/", "a/b");
        let first = vfs.navigate(&p).map(|d| d.len());
        let second = vfs.navigate(&p).map(|d| d.len());
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn find_names_and_content() {
        let mut vfs = MemoryVfs::new();
        vfs.create_directory("/", "notes").unwrap();
        vfs.create_file("/notes", "todo.txt", "buy milk").unwrap();
        vfs.create_file("/notes", "milk.txt", "milk").unwrap();
        vfs.create_file("/", "other", "nothing").unwrap();
        let found = vfs.find("/", "milk").unwrap();
        assert_eq!(
            found,
            vec![
                FindMatch {
                    path: "/notes/milk.txt".to_string(),
                    content_match: false,
                },
                FindMatch {
                    path: "/notes/todo.txt".to_string(),
                    content_match: true,
                },
            ]
        );
        assert!(vfs.find("/other", "x").is_none());
    }

    #[test]
    fn deeply_nested_dirs() {
        let mut vfs = MemoryVfs::new();
        let mut parent = "/".to_string();
        for i in 0..50 {
            let name = format!("d{i}");
            vfs.create_directory(&parent, &name).unwrap();
            parent = path::join(&parent, &name);
        }
        vfs.create_file(&parent, "leaf.txt", "deep").unwrap();
        assert_eq!(vfs.read_file(&path::join(&parent, "leaf.txt")), Some("deep"));
    }

    #[test]
    fn unicode_and_spaces_in_names() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "file with spaces.txt", "ok").unwrap();
        vfs.create_file("/", "\u{1F600}_emoji.txt", "smiley").unwrap();
        assert_eq!(vfs.read_file("/file with spaces.txt"), Some("ok"));
        assert_eq!(vfs.read_file("/\u{1F600}_emoji.txt"), Some("smiley"));
    }

    #[test]
    fn size_counts_bytes() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "u", "\u{e9}").unwrap();
        let entries = vfs.list_children("/").unwrap();
        assert_eq!(entries[0].size, Some(2));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn create_then_read_roundtrips(
                dir in "[a-z]{1,8}",
                file in "[a-z]{1,8}",
                content in "\\PC{0,64}",
            ) {
                let mut vfs = MemoryVfs::new();
                vfs.create_directory("/", &dir).unwrap();
                let dir_path = format!("/{dir}");
                vfs.create_file(&dir_path, &file, &content).unwrap();
                let file_path = format!("{dir_path}/{file}");
                prop_assert_eq!(vfs.read_file(&file_path), Some(content.as_str()));
            }

            #[test]
            fn failed_create_changes_nothing(name in "[a-z]{1,8}") {
                let mut vfs = MemoryVfs::new();
                vfs.create_file("/", &name, "first").unwrap();
                prop_assert!(vfs.create_file("/", &name, "second").is_err());
                prop_assert_eq!(vfs.read_file(&format!("/{name}")), Some("first"));
                prop_assert_eq!(vfs.root().len(), 1);
            }

            #[test]
            fn delete_then_not_exists(name in "[a-z]{1,8}") {
                let mut vfs = MemoryVfs::new();
                vfs.create_directory("/", &name).unwrap();
                let p = format!("/{name}");
                vfs.delete_node(&p).unwrap();
                prop_assert!(!vfs.exists(&p));
            }
        }
    }
}
