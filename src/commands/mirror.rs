//! The mirror run: scan both trees, merge, apply

use crate::config::Config;
use crate::diff::{merge_diff, DiffPlan, PlanStats};
use crate::executor::{ExecutionStats, Executor};
use crate::scanner::{scan_pair, PairProgressCallback, ScanOptions, TreeSide};
use crate::types::MirrorError;
use crate::ui::{format_dry_run_actions, multi_progress, ProgressReporter};
use indicatif::MultiProgress;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// What one run scanned, decided and did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub source_files: usize,
    pub destination_files: usize,
    /// Wall time of the scan phase (both trees)
    pub scan_duration: Duration,
    pub dry_run: bool,
    pub plan: PlanStats,
    /// All zero for a dry run
    pub execution: ExecutionStats,
}

/// Run the mirror operation, drawing progress when `config.show_progress` is set
pub fn run(config: &Config) -> Result<RunSummary, MirrorError> {
    run_with_progress(config, multi_progress(config.show_progress))
}

/// Run the mirror operation with progress bars placed in `multi`
///
/// The roots are validated first. Actions are applied in merged path order
/// as the merge produces them; the first fatal error aborts the run with
/// everything before it already applied. A dry run collects the plan
/// instead and prints it.
pub fn run_with_progress(
    config: &Config,
    multi: MultiProgress,
) -> Result<RunSummary, MirrorError> {
    config.validate()?;

    info!(
        "Backing up {} to {}",
        config.source.display(),
        config.destination.display()
    );

    let reporter = Arc::new(ProgressReporter::new(multi));
    let on_progress: PairProgressCallback = {
        let reporter = Arc::clone(&reporter);
        Arc::new(move |side: TreeSide, files: u64, bytes: u64| {
            reporter.update_scan(side, files, bytes)
        })
    };

    let options = ScanOptions::from(config);
    let scan_start = Instant::now();
    let (source_tree, dest_tree) = scan_pair(
        &config.source,
        &config.destination,
        &options,
        config.scan_mode,
        Some(on_progress),
    )?;
    let scan_duration = scan_start.elapsed();
    info!("Scanning took {:?}.", scan_duration);

    reporter.finish_scan(TreeSide::Source, source_tree.len(), source_tree.total_size);
    reporter.finish_scan(
        TreeSide::Destination,
        dest_tree.len(),
        dest_tree.total_size,
    );

    let actions = merge_diff(&source_tree, &dest_tree, config.time_tolerance);

    if config.dry_run {
        let plan = DiffPlan::from_actions(actions);
        // stderr keeps stdout clean for --json
        eprintln!(
            "{}",
            format_dry_run_actions(&plan, &source_tree, &dest_tree)
        );
        return Ok(RunSummary {
            source_files: source_tree.len(),
            destination_files: dest_tree.len(),
            scan_duration,
            dry_run: true,
            plan: plan.stats,
            execution: ExecutionStats::default(),
        });
    }

    let executor = Executor::new(config);
    let mut plan_stats = PlanStats::default();
    let mut exec_stats = ExecutionStats::default();

    for action in actions {
        plan_stats.record(&action);
        reporter.start_action(action.action_name(), &action.entry().path);
        let outcome = executor.execute(&action)?;
        exec_stats.record(outcome);
        reporter.complete_action();
    }

    reporter.finish_actions(&exec_stats);
    info!(
        "Mirror complete: {} copied, {} deleted, {} unchanged.",
        exec_stats.files_copied, exec_stats.files_deleted, exec_stats.unchanged
    );

    Ok(RunSummary {
        source_files: source_tree.len(),
        destination_files: dest_tree.len(),
        scan_duration,
        dry_run: false,
        plan: plan_stats,
        execution: exec_stats,
    })
}
