//! Error types for treemirror

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Error types for mirror operations
///
/// Each filesystem variant names the operation that failed and the path it
/// failed on, so the single top-level handler can print one diagnostic line.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error opening directory for scanning {path}: {source}")]
    OpenDirectory { path: PathBuf, source: io::Error },

    #[error("Error reading directory {path}: {source}")]
    ReadDirectory { path: PathBuf, source: io::Error },

    #[error("Error reading metadata for {path}: {source}")]
    ReadMetadata { path: PathBuf, source: io::Error },

    /// Traversal failure with no underlying I/O cause (e.g. a symlink loop)
    #[error("Error walking directory tree: {0}")]
    Walk(String),

    #[error("Error opening source file {path}: {source}")]
    OpenSource { path: PathBuf, source: io::Error },

    #[error("Error creating subdirectory {path}: {source}")]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("Error opening destination file for writing {path}: {source}")]
    CreateDestination { path: PathBuf, source: io::Error },

    #[error("Error copying {from} to {to}: {source}")]
    CopyContents {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Error stating source file to obtain file times {path}: {source}")]
    StatSource { path: PathBuf, source: io::Error },

    #[error("Error setting file times on {path}: {source}")]
    SetTimes { path: PathBuf, source: io::Error },

    #[error("Error deleting destination file flagged for deletion {path}: {source}")]
    Delete { path: PathBuf, source: io::Error },

    /// A concurrent scan task failed to complete
    #[error("Scan task failed: {0}")]
    Task(String),
}

impl MirrorError {
    /// Underlying I/O error, if this failure has one
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            MirrorError::Io(source)
            | MirrorError::OpenDirectory { source, .. }
            | MirrorError::ReadDirectory { source, .. }
            | MirrorError::ReadMetadata { source, .. }
            | MirrorError::OpenSource { source, .. }
            | MirrorError::CreateDirectory { source, .. }
            | MirrorError::CreateDestination { source, .. }
            | MirrorError::CopyContents { source, .. }
            | MirrorError::StatSource { source, .. }
            | MirrorError::SetTimes { source, .. }
            | MirrorError::Delete { source, .. } => Some(source),
            MirrorError::Config(_) | MirrorError::Walk(_) | MirrorError::Task(_) => None,
        }
    }

    /// Check if the underlying cause is one the tolerance flag may skip
    pub fn is_skippable(&self) -> bool {
        self.io_source().is_some_and(is_skippable)
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, MirrorError::Config(_))
    }
}

/// `EOPNOTSUPP`, reported when opening or listing a socket
#[cfg(target_os = "linux")]
const EOPNOTSUPP: i32 = 95;
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
const EOPNOTSUPP: i32 = 102;

/// Whether an I/O failure is in the tolerable set
///
/// Permission denied, operation not supported on a socket, and no such file
/// or directory (the entry vanished between listing and open).
pub fn is_skippable(error: &io::Error) -> bool {
    match error.kind() {
        ErrorKind::PermissionDenied | ErrorKind::NotFound | ErrorKind::Unsupported => true,
        _ => is_unsupported_on_socket(error),
    }
}

#[cfg(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
fn is_unsupported_on_socket(error: &io::Error) -> bool {
    error.raw_os_error() == Some(EOPNOTSUPP)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
fn is_unsupported_on_socket(_error: &io::Error) -> bool {
    false
}
