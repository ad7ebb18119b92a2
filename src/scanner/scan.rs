//! Scan one tree into a sorted FileTree

use crate::scanner::walker::{walk_directory, ScanOptions};
use crate::types::{FileTree, MirrorError};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Callback for reporting scan progress
///
/// Arguments:
/// - `files_scanned`: Total number of files scanned so far
/// - `bytes_scanned`: Total bytes scanned so far
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Scan a directory and build a sorted FileTree
///
/// Drains the lazy walker, then sorts once by path. The first fatal error
/// aborts the scan; tolerated errors never reach this point.
///
/// # Arguments
/// * `root_path` - The root directory to scan
/// * `options` - Excluded directory names and error tolerance
/// * `on_progress` - Optional callback for progress updates (files_scanned, bytes_scanned)
pub fn scan_tree(
    root_path: &Path,
    options: &ScanOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<FileTree, MirrorError> {
    let start_time = Instant::now();

    let mut entries = Vec::new();
    let mut scanned_bytes: u64 = 0;

    for result in walk_directory(root_path, options) {
        let entry = result?;
        scanned_bytes += entry.size;
        entries.push(entry);

        if let Some(callback) = on_progress {
            callback(entries.len() as u64, scanned_bytes);
        }
    }

    let mut tree = FileTree::from_entries(root_path.to_path_buf(), entries);
    tree.set_scan_duration(start_time.elapsed());

    debug!(
        "Scanned {}: {} files, {} bytes in {:?}",
        root_path.display(),
        tree.len(),
        tree.total_size,
        tree.scan_duration
    );

    Ok(tree)
}
