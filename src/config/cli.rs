//! Command-line arguments

use super::ScanMode;
use clap::Parser;
use std::path::PathBuf;

/// Mirror SOURCE onto DESTINATION: copy new and changed files, optionally
/// delete files that no longer exist in SOURCE.
#[derive(Debug, Parser)]
#[command(name = "treemirror", version, about)]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,

    /// Directory to mirror into (created on first copy if missing)
    pub destination: PathBuf,

    /// Scan the two trees one after the other or at the same time
    #[arg(long, value_enum)]
    pub scan_mode: Option<ScanMode>,

    /// Delete destination files that are absent from the source
    #[arg(long)]
    pub delete: bool,

    /// Skip files and directories that fail with permission denied,
    /// operation not supported on socket, or no such file or directory
    #[arg(long)]
    pub skip_permission_denied: bool,

    /// Directory name to skip at any depth (repeatable; replaces the default "spool")
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Seconds a destination file may lag behind its source before it is recopied
    #[arg(long, value_name = "SECS")]
    pub tolerance_secs: Option<u64>,

    /// Show what would be copied and deleted without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors; no progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default tracing filter directive for the chosen verbosity
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
