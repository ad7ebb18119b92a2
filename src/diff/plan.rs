//! Collected diff plans and their statistics

use crate::types::{CopyReason, SyncAction};
use serde::Serialize;

/// Diff plan containing actions and statistics
///
/// The normal run streams actions straight from the merge into the
/// executor; a plan is only materialized for dry runs and previews.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffPlan<'a> {
    /// Actions in merged path order
    pub actions: Vec<SyncAction<'a>>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,
}

impl<'a> DiffPlan<'a> {
    /// Create a new empty diff plan
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            stats: PlanStats::default(),
        }
    }

    /// Collect a full action stream
    pub fn from_actions(actions: impl IntoIterator<Item = SyncAction<'a>>) -> Self {
        let mut plan = Self::new();
        for action in actions {
            plan.add_action(action);
        }
        plan
    }

    /// Add an action to the plan and update statistics
    pub fn add_action(&mut self, action: SyncAction<'a>) {
        self.stats.record(&action);
        self.actions.push(action);
    }

    /// Whether anything besides NoOps was planned
    pub fn has_changes(&self) -> bool {
        self.actions.iter().any(|action| !action.is_noop())
    }
}

impl Default for DiffPlan<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts of what the merge decided
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlanStats {
    /// Copies of files missing from the destination
    pub copy_new: usize,

    /// Copies over a destination file that changed size or went stale
    pub copy_changed: usize,

    /// Total bytes of all planned copies
    pub copy_bytes: u64,

    /// Destination files with no source counterpart
    pub delete: usize,

    /// Matched pairs left alone
    pub unchanged: usize,
}

impl PlanStats {
    /// Count one action
    pub fn record(&mut self, action: &SyncAction<'_>) {
        match action {
            SyncAction::Copy { entry, reason } => {
                match reason {
                    CopyReason::Missing => self.copy_new += 1,
                    CopyReason::SizeChanged | CopyReason::Stale => self.copy_changed += 1,
                }
                self.copy_bytes += entry.size;
            }
            SyncAction::Delete(_) => self.delete += 1,
            SyncAction::NoOp(_) => self.unchanged += 1,
        }
    }

    /// Number of planned copies of any kind
    pub fn copies(&self) -> usize {
        self.copy_new + self.copy_changed
    }
}
