//! Configuration file support for persistent settings.
//!
//! This module loads defaults from a TOML file located at
//! `~/.config/dir-sizer/config.toml` (or the platform-specific equivalent).
//! Values from the file serve as defaults that CLI arguments override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dirs = ["~/Projects", "~/Downloads"]
//!
//! [reporting]
//! recursive = false
//! human = true
//!
//! [scanning]
//! threads = 4
//! verbose = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so that absent keys can be told apart from
/// explicit values when layering the CLI on top.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Directories to measure when `--dirs` is not given
    pub dirs: Option<Vec<PathBuf>>,

    /// Reporting options
    #[serde(default)]
    pub reporting: FileReportingConfig,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,
}

/// Reporting options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileReportingConfig {
    /// Print every subdirectory's size
    pub recursive: Option<bool>,

    /// Use K/M/G/T/P suffixes
    pub human: Option<bool>,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileScanConfig {
    /// Number of threads in the aggregation pool
    pub threads: Option<usize>,

    /// Whether to emit debug logs
    pub verbose: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use dir_sizer::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The file lives at `<config_dir>/dir-sizer/config.toml`, where
    /// `<config_dir>` is the platform configuration directory (e.g.
    /// `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dir-sizer").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or contains
    /// invalid TOML or unknown keys.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }

    /// Configured directories with `~` expanded, if any are set.
    #[must_use]
    pub fn expanded_dirs(&self) -> Option<Vec<PathBuf>> {
        self.dirs
            .as_ref()
            .filter(|dirs| !dirs.is_empty())
            .map(|dirs| dirs.iter().map(|d| expand_tilde(d)).collect())
    }
}
