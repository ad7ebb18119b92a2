//! Two-cursor merge over sorted trees

use crate::diff::compare::compare_files;
use crate::types::{CopyReason, FileEntry, FileTree, SyncAction};
use std::cmp::Ordering;
use std::iter::{FusedIterator, Peekable};
use std::slice;
use std::time::Duration;

/// Lazy, forward-only stream of actions for two sorted trees
///
/// Each step consumes the head of one or both trees, so the pass is
/// O(n + m) and cannot be restarted. Paths are compared relative to each
/// tree's own root, byte-wise.
///
/// Both trees must hold unique paths in ascending order (which
/// [`FileTree::from_entries`] guarantees). A duplicate relative path within
/// one tree is not detected and would desynchronize the cursors.
pub struct MergeDiff<'a> {
    source: &'a FileTree,
    dest: &'a FileTree,
    source_cursor: Peekable<slice::Iter<'a, FileEntry>>,
    dest_cursor: Peekable<slice::Iter<'a, FileEntry>>,
    tolerance: Duration,
}

/// Start a merge-diff of `source` against `dest`
pub fn merge_diff<'a>(
    source: &'a FileTree,
    dest: &'a FileTree,
    tolerance: Duration,
) -> MergeDiff<'a> {
    MergeDiff {
        source,
        dest,
        source_cursor: source.iter().peekable(),
        dest_cursor: dest.iter().peekable(),
        tolerance,
    }
}

impl<'a> MergeDiff<'a> {
    fn relative_key(tree: &FileTree, entry: &'a FileEntry) -> &'a [u8] {
        tree.relative_path(entry).as_os_str().as_encoded_bytes()
    }
}

impl<'a> Iterator for MergeDiff<'a> {
    type Item = SyncAction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match (
            self.source_cursor.peek().copied(),
            self.dest_cursor.peek().copied(),
        ) {
            (None, None) => None,

            // Source exhausted: everything left in dest is extraneous
            (None, Some(dest)) => {
                self.dest_cursor.next();
                Some(SyncAction::Delete(dest))
            }

            // Dest exhausted: everything left in source is missing
            (Some(src), None) => {
                self.source_cursor.next();
                Some(SyncAction::Copy {
                    entry: src,
                    reason: CopyReason::Missing,
                })
            }

            (Some(src), Some(dest)) => {
                let src_key = Self::relative_key(self.source, src);
                let dest_key = Self::relative_key(self.dest, dest);

                match src_key.cmp(dest_key) {
                    Ordering::Equal => {
                        self.source_cursor.next();
                        self.dest_cursor.next();
                        Some(compare_files(src, dest, self.tolerance))
                    }
                    Ordering::Less => {
                        self.source_cursor.next();
                        Some(SyncAction::Copy {
                            entry: src,
                            reason: CopyReason::Missing,
                        })
                    }
                    Ordering::Greater => {
                        self.dest_cursor.next();
                        Some(SyncAction::Delete(dest))
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (src_len, _) = self.source_cursor.size_hint();
        let (dest_len, _) = self.dest_cursor.size_hint();
        (src_len.max(dest_len), Some(src_len + dest_len))
    }
}

impl FusedIterator for MergeDiff<'_> {}
