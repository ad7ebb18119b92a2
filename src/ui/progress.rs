//! Progress reporting

use crate::executor::ExecutionStats;
use crate::scanner::TreeSide;
use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for mirror runs
///
/// One spinner per tree while scanning (both may move at once in
/// concurrent mode), then one spinner counting executed actions. All bars
/// are hidden when the `MultiProgress` is, but still track their state.
pub struct ProgressReporter {
    _multi: MultiProgress,
    source_bar: ProgressBar,
    dest_bar: ProgressBar,
    action_bar: ProgressBar,
}

/// Progress container drawing to stderr, or hidden when `enabled` is false
pub fn multi_progress(enabled: bool) -> MultiProgress {
    if enabled {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

impl ProgressReporter {
    /// Create a reporter whose bars live in `multi`
    ///
    /// Spinners only tick when `multi` actually draws.
    pub fn new(multi: MultiProgress) -> Self {
        let animate = !multi.is_hidden();
        let source_bar = multi.add(scan_spinner(animate));
        let dest_bar = multi.add(scan_spinner(animate));

        let action_bar = multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {pos} actions | {msg}") {
            action_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self {
            _multi: multi,
            source_bar,
            dest_bar,
            action_bar,
        }
    }

    /// A reporter that never draws
    #[cfg(test)]
    fn hidden() -> Self {
        Self::new(multi_progress(false))
    }

    fn scan_bar(&self, side: TreeSide) -> &ProgressBar {
        match side {
            TreeSide::Source => &self.source_bar,
            TreeSide::Destination => &self.dest_bar,
        }
    }

    /// Update scanning progress counters.
    pub fn update_scan(&self, side: TreeSide, files: u64, bytes: u64) {
        self.scan_bar(side).set_message(format!(
            "Scanning {}... {} files | {}",
            side,
            files,
            HumanBytes(bytes)
        ));
    }

    /// Mark completion of a scanning phase.
    pub fn finish_scan(&self, side: TreeSide, files: usize, bytes: u64) {
        self.scan_bar(side).finish_with_message(format!(
            "Scanned {}: {} files | {}",
            side,
            files,
            HumanBytes(bytes)
        ));
    }

    /// Show the action about to be applied.
    pub fn start_action(&self, action: &str, path: &Path) {
        self.action_bar
            .set_message(format!("{} {}", action, path.display()));
    }

    /// Count one applied action.
    pub fn complete_action(&self) {
        self.action_bar.inc(1);
    }

    /// Finalize the execution phase.
    pub fn finish_actions(&self, stats: &ExecutionStats) {
        self.action_bar.finish_with_message(format!(
            "{} copied ({}) | {} deleted | {} unchanged",
            stats.files_copied,
            HumanBytes(stats.bytes_copied),
            stats.files_deleted,
            stats.unchanged
        ));
    }

    #[cfg(test)]
    fn actions_completed(&self) -> u64 {
        self.action_bar.position()
    }
}

fn scan_spinner(animate: bool) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if animate {
        bar.enable_steady_tick(Duration::from_millis(120));
    }
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    bar
}
