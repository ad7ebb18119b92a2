//! Console output: progress bars, log routing and the end-of-run summary

mod log_writer;
mod progress;
mod summary;

pub use log_writer::ProgressLogWriter;
pub use progress::{multi_progress, ProgressReporter};
pub use summary::{format_dry_run_actions, format_summary};
