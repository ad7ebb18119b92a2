//! Optional TOML settings file

use super::ScanMode;
use crate::types::MirrorError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings that may be stored in a file instead of passed as flags
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub exclude_names: Option<Vec<String>>,
    pub tolerance_secs: Option<u64>,
    pub delete: Option<bool>,
    pub skip_permission_denied: Option<bool>,
    pub scan_mode: Option<ScanMode>,
}

impl SettingsFile {
    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self, MirrorError> {
        let text = fs::read_to_string(path).map_err(|e| {
            MirrorError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text).map_err(|e| {
            MirrorError::Config(format!("Invalid settings file {}: {}", path.display(), e))
        })
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
