//! SyncAction - Actions produced by the merge-diff

use super::FileEntry;
use serde::Serialize;
use std::fmt;

/// Why a source file is being copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyReason {
    /// No file at the same relative path in the destination
    Missing,

    /// Destination file exists but its size differs
    SizeChanged,

    /// Same size, but the destination is older than the tolerance allows
    Stale,
}

impl fmt::Display for CopyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CopyReason::Missing => "new",
            CopyReason::SizeChanged => "size changed",
            CopyReason::Stale => "stale",
        };
        f.write_str(label)
    }
}

/// Action decided for one path of the merged trees
///
/// Actions borrow entries from the two trees being compared; they are
/// derived on the fly by the diff and never stored alongside the trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction<'a> {
    /// Copy the source entry over to the mirrored destination path
    Copy {
        entry: &'a FileEntry,
        reason: CopyReason,
    },

    /// Destination entry has no source counterpart
    Delete(&'a FileEntry),

    /// Source and destination agree (carries the source entry)
    NoOp(&'a FileEntry),
}

impl<'a> SyncAction<'a> {
    /// The entry this action refers to
    pub fn entry(&self) -> &'a FileEntry {
        match *self {
            SyncAction::Copy { entry, .. } => entry,
            SyncAction::Delete(entry) | SyncAction::NoOp(entry) => entry,
        }
    }

    /// Short name used in logs and events
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::Copy { .. } => "Copy",
            SyncAction::Delete(_) => "Delete",
            SyncAction::NoOp(_) => "NoOp",
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, SyncAction::Copy { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, SyncAction::Delete(_))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, SyncAction::NoOp(_))
    }
}
