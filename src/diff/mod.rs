//! Diff engine - Comparison logic and the merge pass

mod compare;
mod merge;
mod plan;

pub use compare::compare_files;
pub use merge::{merge_diff, MergeDiff};
pub use plan::{DiffPlan, PlanStats};
