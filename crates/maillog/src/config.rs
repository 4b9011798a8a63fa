//! Configuration file support for maillog.
//!
//! Loads `maillog.toml` from an explicit path, the working directory, or the
//! user's config directory, in that order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use maillog_logging::LogFormat;
use maillog_sessions::DurationMode;

/// Settings loaded from `maillog.toml`. Command-line flags override them.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MaillogConfig {
    /// How session durations are computed
    pub duration_mode: Option<DurationMode>,
    /// Tracing filter directive, e.g. "info" or "maillog_sessions=debug"
    pub log_level: Option<String>,
    /// Diagnostic log format
    pub log_format: Option<LogFormat>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "maillog.toml";

impl MaillogConfig {
    /// Locate and load configuration.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a file was found and parsed
    /// - `Ok(None)` if no file exists at any of the searched locations
    /// - `Err(...)` if an explicit path is missing or any found file fails to parse
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::from_file(path).map(Some);
        }

        for candidate in Self::candidate_paths(working_dir) {
            if candidate.exists() {
                return Self::from_file(&candidate).map(Some);
            }
        }

        Ok(None)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: MaillogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn candidate_paths(working_dir: &Path) -> Vec<PathBuf> {
        let mut paths = vec![working_dir.join(CONFIG_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("maillog").join(CONFIG_FILE_NAME));
        }
        paths
    }
}
