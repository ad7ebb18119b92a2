//! # treemirror - One-way directory mirroring
//!
//! Makes a destination tree match a source tree: new and changed files are
//! copied over, files absent from the source are optionally deleted.
//!
//! The pipeline is scan (both trees, optionally concurrently) → sort →
//! merge-diff → execute. Change detection is metadata only (size and
//! modification time); file contents are never hashed.

// Module declarations
pub mod config;
pub mod scanner;
pub mod diff;
pub mod executor;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{CopyReason, FileEntry, FileTree, MirrorError, SyncAction};
pub use config::{Config, ScanMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
