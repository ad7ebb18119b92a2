//! Core type definitions for treemirror

mod action;
mod entry;
mod error;
mod tree;

pub use action::{CopyReason, SyncAction};
pub use entry::FileEntry;
pub use error::{is_skippable, MirrorError};
pub use tree::{sort_entries, FileTree};
