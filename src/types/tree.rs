//! FileTree - Sorted scan result for one root directory

use super::FileEntry;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Entries of one scanned tree, sorted ascending by path
///
/// The sort is established once in [`FileTree::from_entries`] and the entry
/// list is never mutated afterward. The merge-diff relies on this order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTree {
    /// Root directory the entries were found under
    pub root_path: PathBuf,

    entries: Vec<FileEntry>,

    /// Aggregate statistics
    pub total_size: u64,

    /// Scan metadata
    pub scan_duration: Duration,
}

impl FileTree {
    /// Create a new empty FileTree
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            entries: Vec::new(),
            total_size: 0,
            scan_duration: Duration::from_secs(0),
        }
    }

    /// Build a tree from scanned entries, sorting them by path
    ///
    /// Ordering is plain byte-wise comparison of the path, the same ordering
    /// a string comparison would give. Paths are unique within one scan so
    /// ties never occur.
    pub fn from_entries(root_path: PathBuf, mut entries: Vec<FileEntry>) -> Self {
        sort_entries(&mut entries);
        let total_size = entries.iter().map(|e| e.size).sum();
        Self {
            root_path,
            entries,
            total_size,
            scan_duration: Duration::from_secs(0),
        }
    }

    /// Entries in sorted order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Path of `entry` relative to this tree's root
    ///
    /// Entries produced by the scanner always live under the root; anything
    /// else is returned unchanged.
    pub fn relative_path<'a>(&self, entry: &'a FileEntry) -> &'a Path {
        entry
            .path
            .strip_prefix(&self.root_path)
            .unwrap_or(&entry.path)
    }

    /// Return the number of file entries in the tree
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all entries in sorted order
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Set the scan duration after scanning completes
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }
}

/// Sort entries ascending by path bytes
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_unstable_by(|a, b| a.path_bytes().cmp(b.path_bytes()));
}
