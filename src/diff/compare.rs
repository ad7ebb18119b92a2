//! File comparison logic

use crate::types::{CopyReason, FileEntry, SyncAction};
use std::time::Duration;

/// Compare a matched pair (same relative path on both sides)
///
/// Metadata only, content is never read:
///
/// 1. **Size mismatch**: sizes differ → Copy, regardless of timestamps
/// 2. **Stale destination**: `dest.mtime + tolerance < src.mtime` → Copy
/// 3. Otherwise → NoOp. A destination that is newer than the source, or
///    older by no more than `tolerance`, is left alone.
pub fn compare_files<'a>(
    src: &'a FileEntry,
    dest: &FileEntry,
    tolerance: Duration,
) -> SyncAction<'a> {
    if src.size != dest.size {
        return SyncAction::Copy {
            entry: src,
            reason: CopyReason::SizeChanged,
        };
    }

    let stale = dest
        .mtime
        .checked_add(tolerance)
        .is_some_and(|deadline| deadline < src.mtime);

    if stale {
        SyncAction::Copy {
            entry: src,
            reason: CopyReason::Stale,
        }
    } else {
        SyncAction::NoOp(src)
    }
}
