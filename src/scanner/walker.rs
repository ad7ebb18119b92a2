//! Lazy recursive directory walker

use crate::config::Config;
use crate::types::{FileEntry, MirrorError};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{trace, warn};

/// What the walker records and what it tolerates
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Directory names skipped, together with their contents, at any depth
    pub exclude_names: BTreeSet<String>,

    /// Skip subtrees that fail with a tolerable error instead of aborting
    pub skip_if_permission_denied: bool,
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            exclude_names: config.exclude_names.clone(),
            skip_if_permission_denied: config.skip_if_permission_denied,
        }
    }
}

/// Iterator over the regular files below a root directory
///
/// Yields entries in directory-listing order. A fatal error is yielded as
/// `Err`; callers are expected to stop at the first one.
pub struct TreeWalker {
    root: PathBuf,
    inner: ignore::Walk,
    skip_if_permission_denied: bool,
}

/// Start walking `root_path`
///
/// Uses the `ignore` crate for traversal with every ignore-file filter
/// disabled: a mirror must see hidden and git-ignored files too. The only
/// pruning is by directory name (`options.exclude_names`).
///
/// Symlinks are not followed and are not recorded; neither are sockets,
/// pipes or device nodes.
pub fn walk_directory(root_path: &Path, options: &ScanOptions) -> TreeWalker {
    let exclude = Arc::new(options.exclude_names.clone());

    let inner = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            let excluded = entry
                .file_name()
                .to_str()
                .is_some_and(|name| exclude.contains(name));
            if excluded {
                trace!("Excluding directory {}", entry.path().display());
            }
            !excluded
        })
        .build();

    TreeWalker {
        root: root_path.to_path_buf(),
        inner,
        skip_if_permission_denied: options.skip_if_permission_denied,
    }
}

impl TreeWalker {
    /// Turn one walk result into an entry, a skip (`None`), or a fatal error
    fn visit(
        &self,
        result: Result<ignore::DirEntry, ignore::Error>,
    ) -> Option<Result<FileEntry, MirrorError>> {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => return self.walk_error(err).map(Err),
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                let source = into_io_error(err);
                return self
                    .tolerate(MirrorError::ReadMetadata {
                        path: entry.path().to_path_buf(),
                        source,
                    })
                    .map(Err);
            }
        };

        let mtime = match metadata.modified() {
            Ok(mtime) => mtime,
            Err(source) => {
                return Some(Err(MirrorError::ReadMetadata {
                    path: entry.path().to_path_buf(),
                    source,
                }))
            }
        };

        Some(Ok(FileEntry::new(
            entry.into_path(),
            metadata.len(),
            mtime,
        )))
    }

    /// Classify a traversal error (directory could not be opened or listed)
    fn walk_error(&self, err: ignore::Error) -> Option<MirrorError> {
        let path = error_path(&err);
        if err.io_error().is_none() {
            return Some(MirrorError::Walk(err.to_string()));
        }

        let source = into_io_error(err);
        let error = match path {
            Some(path) if path == self.root => MirrorError::OpenDirectory { path, source },
            Some(path) => MirrorError::ReadDirectory { path, source },
            None => MirrorError::Io(source),
        };
        self.tolerate(error)
    }

    /// Drop the error if tolerance is on and it is in the skippable set
    fn tolerate(&self, error: MirrorError) -> Option<MirrorError> {
        if self.skip_if_permission_denied && error.is_skippable() {
            warn!("Skipping: {}", error);
            None
        } else {
            Some(error)
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<FileEntry, MirrorError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            if let Some(item) = self.visit(result) {
                return Some(item);
            }
        }
    }
}

/// Innermost path attached to an `ignore` error
fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, err } => error_path(err).or_else(|| Some(path.clone())),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}

fn into_io_error(err: ignore::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}
