//! Executor module for file operations

pub mod copy;

use crate::config::Config;
use crate::types::{MirrorError, SyncAction};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use copy::copy_file;

/// What applying one action actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// File copied, with the number of bytes written
    Copied(u64),
    /// Source could not be opened and the failure was tolerated
    CopySkipped,
    Deleted,
    /// Delete computed but deletions are disabled for this run
    DeleteSkipped,
    Unchanged,
}

/// Execution statistics for a mirror run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionStats {
    pub files_copied: usize,
    pub bytes_copied: u64,
    pub copies_skipped: usize,
    pub files_deleted: usize,
    pub deletes_skipped: usize,
    pub unchanged: usize,
}

impl ExecutionStats {
    pub fn record(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Copied(bytes) => {
                self.files_copied += 1;
                self.bytes_copied += bytes;
            }
            ActionOutcome::CopySkipped => self.copies_skipped += 1,
            ActionOutcome::Deleted => self.files_deleted += 1,
            ActionOutcome::DeleteSkipped => self.deletes_skipped += 1,
            ActionOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Applies actions against the filesystem, one at a time
///
/// Any error returned from [`Executor::execute`] is fatal for the run;
/// tolerated failures come back as `Ok` outcomes.
#[derive(Debug, Clone)]
pub struct Executor {
    source_root: PathBuf,
    destination_root: PathBuf,
    perform_deletes: bool,
    skip_if_permission_denied: bool,
}

impl Executor {
    pub fn new(config: &Config) -> Self {
        Self {
            source_root: config.source.clone(),
            destination_root: config.destination.clone(),
            perform_deletes: config.perform_deletes,
            skip_if_permission_denied: config.skip_if_permission_denied,
        }
    }

    /// Apply one action
    pub fn execute(&self, action: &SyncAction<'_>) -> Result<ActionOutcome, MirrorError> {
        match action {
            SyncAction::Copy { entry, reason } => {
                let destination = self.mirrored_path(&entry.path)?;
                debug!(
                    "Copy ({}): {} => {}",
                    reason,
                    entry.path.display(),
                    destination.display()
                );
                let outcome = match copy_file(
                    &entry.path,
                    &destination,
                    self.skip_if_permission_denied,
                )? {
                    Some(bytes) => ActionOutcome::Copied(bytes),
                    None => ActionOutcome::CopySkipped,
                };
                Ok(outcome)
            }
            SyncAction::Delete(entry) => {
                if !self.perform_deletes {
                    debug!("Would delete: {}", entry.path.display());
                    return Ok(ActionOutcome::DeleteSkipped);
                }
                debug!("Delete: {}", entry.path.display());
                // Parent directories are left in place even when emptied.
                fs::remove_file(&entry.path).map_err(|source| MirrorError::Delete {
                    path: entry.path.clone(),
                    source,
                })?;
                Ok(ActionOutcome::Deleted)
            }
            SyncAction::NoOp(_) => Ok(ActionOutcome::Unchanged),
        }
    }

    /// Destination path for a source file: same path relative to the roots
    pub fn mirrored_path(&self, source_path: &Path) -> Result<PathBuf, MirrorError> {
        let relative = source_path.strip_prefix(&self.source_root).map_err(|_| {
            MirrorError::Config(format!(
                "{} is not under source root {}",
                source_path.display(),
                self.source_root.display()
            ))
        })?;
        Ok(self.destination_root.join(relative))
    }
}
