//! FileEntry - One regular file found while scanning a tree

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// Metadata for a single regular file
///
/// Directories are never recorded as entries; the scanner only traverses them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path (the scan root joined with the file's relative path)
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modification time
    pub mtime: SystemTime,
}

impl FileEntry {
    /// Create a new FileEntry with the given parameters
    pub fn new(path: PathBuf, size: u64, mtime: SystemTime) -> Self {
        Self { path, size, mtime }
    }

    /// Raw bytes of the path, used as the lexicographic sort key
    pub fn path_bytes(&self) -> &[u8] {
        self.path.as_os_str().as_encoded_bytes()
    }
}
