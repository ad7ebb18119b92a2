//! Scanning the source and destination trees, one after the other or concurrently

use crate::config::ScanMode;
use crate::scanner::scan::{scan_tree, ProgressCallback};
use crate::scanner::walker::ScanOptions;
use crate::types::{FileTree, MirrorError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Which of the two trees a scan belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSide {
    Source,
    Destination,
}

impl fmt::Display for TreeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeSide::Source => f.write_str("Source"),
            TreeSide::Destination => f.write_str("Destination"),
        }
    }
}

/// Progress callback shared by both scans: (side, files_scanned, bytes_scanned)
pub type PairProgressCallback = Arc<dyn Fn(TreeSide, u64, u64) + Send + Sync>;

/// Scan both trees and return them sorted, `(source, destination)`
///
/// In `Concurrent` mode each tree is scanned on its own blocking task and
/// both must finish before this returns; either may finish first. The tasks
/// share nothing. If one fails its error is returned without cancelling the
/// other.
pub fn scan_pair(
    source: &Path,
    destination: &Path,
    options: &ScanOptions,
    mode: ScanMode,
    on_progress: Option<PairProgressCallback>,
) -> Result<(FileTree, FileTree), MirrorError> {
    match mode {
        ScanMode::Sequential => {
            info!("Scanning sequentially.");
            info!("Scanning source tree.");
            let source_tree = scan_side(TreeSide::Source, source, options, on_progress.as_ref())?;
            info!("Scanning destination tree.");
            let dest_tree =
                scan_side(TreeSide::Destination, destination, options, on_progress.as_ref())?;
            Ok((source_tree, dest_tree))
        }
        ScanMode::Concurrent => {
            info!("Scanning source and destination trees concurrently.");
            scan_concurrently(source, destination, options, on_progress)
        }
    }
}

fn scan_concurrently(
    source: &Path,
    destination: &Path,
    options: &ScanOptions,
    on_progress: Option<PairProgressCallback>,
) -> Result<(FileTree, FileTree), MirrorError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let source_task = spawn_side(
            TreeSide::Source,
            source.to_path_buf(),
            options.clone(),
            on_progress.clone(),
        );
        let dest_task = spawn_side(
            TreeSide::Destination,
            destination.to_path_buf(),
            options.clone(),
            on_progress,
        );
        tokio::try_join!(source_task, dest_task)
    });

    // Do not wait for a sibling scan still running after the other failed.
    runtime.shutdown_background();
    result
}

async fn spawn_side(
    side: TreeSide,
    root: PathBuf,
    options: ScanOptions,
    on_progress: Option<PairProgressCallback>,
) -> Result<FileTree, MirrorError> {
    let tree = tokio::task::spawn_blocking(move || {
        scan_side(side, &root, &options, on_progress.as_ref())
    })
    .await
    .map_err(|e| MirrorError::Task(format!("{} scan: {}", side, e)))??;

    info!("{} tree scanned.", side);
    Ok(tree)
}

fn scan_side(
    side: TreeSide,
    root: &Path,
    options: &ScanOptions,
    on_progress: Option<&PairProgressCallback>,
) -> Result<FileTree, MirrorError> {
    let callback: Option<ProgressCallback> = on_progress.map(|shared| {
        let shared = Arc::clone(shared);
        Box::new(move |files: u64, bytes: u64| shared(side, files, bytes)) as ProgressCallback
    });
    scan_tree(root, options, callback.as_ref())
}
