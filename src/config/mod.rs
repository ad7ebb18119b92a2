//! Configuration management

mod cli;
mod file;

pub use cli::Cli;
pub use file::SettingsFile;

use crate::types::MirrorError;
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name skipped at every depth unless overridden
pub const DEFAULT_EXCLUDE_NAME: &str = "spool";

/// Window that absorbs filesystem timestamp-resolution noise
pub const DEFAULT_TIME_TOLERANCE: Duration = Duration::from_secs(1);

/// How the two trees are scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Scan source, then destination, on the calling thread
    Sequential,

    /// Scan both trees as independent tasks and wait for both
    #[default]
    Concurrent,
}

/// Settings for one mirror run
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    pub scan_mode: ScanMode,

    /// Remove destination files absent from the source. When off, deletes
    /// are still computed and counted but not performed.
    pub perform_deletes: bool,

    /// Silently skip subtrees/files that fail with a tolerable error
    pub skip_if_permission_denied: bool,

    /// Directory names skipped (with their contents) at any depth
    pub exclude_names: BTreeSet<String>,

    /// Destination counts as stale only when older than source by more than this
    pub time_tolerance: Duration,

    /// Compute and print actions, touch nothing
    pub dry_run: bool,

    /// Draw progress bars on stderr
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            scan_mode: ScanMode::default(),
            perform_deletes: false,
            skip_if_permission_denied: false,
            exclude_names: default_exclude_names(),
            time_tolerance: DEFAULT_TIME_TOLERANCE,
            dry_run: false,
            show_progress: false,
        }
    }
}

pub fn default_exclude_names() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_EXCLUDE_NAME.to_string()])
}

impl Config {
    /// Validate configuration
    ///
    /// Both roots are resolved to absolute, symlink-free paths before they
    /// are compared, so `./data` and `/home/me/data` are the same tree.
    pub fn validate(&self) -> Result<(), MirrorError> {
        if !self.source.is_dir() {
            return Err(MirrorError::Config(format!(
                "Source path is not a directory: {}",
                self.source.display()
            )));
        }

        let source = resolve_path(&self.source)?;
        let destination = resolve_path(&self.destination)?;

        if source == destination {
            return Err(MirrorError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        // A destination inside the source would be scanned as source content.
        if destination.starts_with(&source) {
            return Err(MirrorError::Config(format!(
                "Destination {} is inside source {}",
                self.destination.display(),
                self.source.display()
            )));
        }

        // A source inside the destination would be deleted as extraneous.
        if source.starts_with(&destination) {
            return Err(MirrorError::Config(format!(
                "Source {} is inside destination {}",
                self.source.display(),
                self.destination.display()
            )));
        }

        Ok(())
    }
}

/// Absolute form of `path` with symlinks resolved as far as the path exists
///
/// A destination that does not exist yet keeps its missing tail as written,
/// appended to the canonical form of its deepest existing ancestor.
fn resolve_path(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = std::path::absolute(path).map_err(|e| {
        MirrorError::Config(format!("Cannot resolve path {}: {}", path.display(), e))
    })?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |resolved, part| resolved.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = MirrorError;

    /// Merge CLI flags over the optional settings file over defaults
    ///
    /// Paths are checked by [`Config::validate`] when the run starts.
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let settings = match &cli.config {
            Some(path) => SettingsFile::load(path)?,
            None => SettingsFile::default(),
        };

        let exclude_names = if !cli.exclude.is_empty() {
            cli.exclude.iter().cloned().collect()
        } else if let Some(names) = settings.exclude_names {
            names.into_iter().collect()
        } else {
            default_exclude_names()
        };

        let time_tolerance = cli
            .tolerance_secs
            .or(settings.tolerance_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIME_TOLERANCE);

        Ok(Config {
            source: cli.source,
            destination: cli.destination,
            scan_mode: cli
                .scan_mode
                .or(settings.scan_mode)
                .unwrap_or_default(),
            perform_deletes: cli.delete || settings.delete.unwrap_or(false),
            skip_if_permission_denied: cli.skip_permission_denied
                || settings.skip_permission_denied.unwrap_or(false),
            exclude_names,
            time_tolerance,
            dry_run: cli.dry_run,
            show_progress: !cli.quiet && !cli.json,
        })
    }
}
