//! Human-readable run reports

use crate::commands::mirror::RunSummary;
use crate::diff::DiffPlan;
use crate::types::{FileTree, SyncAction};
use console::style;
use indicatif::{HumanBytes, HumanDuration};

/// One-paragraph summary printed after a run
pub fn format_summary(summary: &RunSummary) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Scanned {} source and {} destination files in {}",
        summary.source_files,
        summary.destination_files,
        HumanDuration(summary.scan_duration)
    ));

    if summary.dry_run {
        lines.push(format!(
            "Dry run: {} to copy ({}), {} to delete, {} unchanged",
            summary.plan.copies(),
            HumanBytes(summary.plan.copy_bytes),
            summary.plan.delete,
            summary.plan.unchanged
        ));
        lines.push(style("Dry-run mode: no changes were made.").yellow().to_string());
        return lines.join("\n");
    }

    let exec = &summary.execution;
    lines.push(format!(
        "Copied {} files ({}), deleted {}, unchanged {}",
        exec.files_copied,
        HumanBytes(exec.bytes_copied),
        exec.files_deleted,
        exec.unchanged
    ));
    if exec.copies_skipped > 0 {
        lines.push(format!(
            "Skipped {} unreadable source file(s)",
            exec.copies_skipped
        ));
    }
    if exec.deletes_skipped > 0 {
        lines.push(format!(
            "{} extraneous destination file(s) kept (run with --delete to remove)",
            exec.deletes_skipped
        ));
    }
    lines.push(style("Done.").green().to_string());
    lines.join("\n")
}

/// List every planned change, relative to its tree root
pub fn format_dry_run_actions(plan: &DiffPlan<'_>, source: &FileTree, dest: &FileTree) -> String {
    if !plan.has_changes() {
        return "Dry-run actions:\n  (no planned actions)".to_string();
    }

    let mut lines = Vec::with_capacity(plan.actions.len() + 2);
    lines.push("Dry-run actions:".to_string());
    for action in &plan.actions {
        match action {
            SyncAction::Copy { entry, reason } => {
                lines.push(format!(
                    "  COPY      {} ({})",
                    source.relative_path(entry).display(),
                    reason
                ));
            }
            SyncAction::Delete(entry) => {
                lines.push(format!("  DELETE    {}", dest.relative_path(entry).display()));
            }
            SyncAction::NoOp(_) => {}
        }
    }

    if plan.stats.unchanged > 0 {
        lines.push(format!(
            "  ({} unchanged file(s) omitted)",
            plan.stats.unchanged
        ));
    }

    lines.join("\n")
}
