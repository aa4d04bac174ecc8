//! Command-line interface definition and argument parsing.
//!
//! This module defines the command-line arguments using the
//! [clap](https://docs.rs/clap/) library and resolves them against the
//! config file so that config values act as defaults (layered config).

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dir_sizer::config::{FileConfig, SizeOptions};

/// Single-dash long flags accepted for compatibility with `-dirs a,b` style
/// invocations.
const LEGACY_FLAGS: &[&str] = &["dirs", "recursive", "human", "threads", "verbose"];

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "dir-sizer")]
#[command(about = "Compute the total on-disk size of a set of directories")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// (required) The directories to measure, separated by commas
    ///
    /// Falls back to `dirs` from the config file when omitted.
    #[arg(long, value_name = "DIR[,DIR...]")]
    dirs: Option<String>,

    /// Report the size of every subdirectory as it completes
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Format sizes in a human-friendly way, e.g. 304K instead of 304000
    ///
    /// Units are decimal: K = 1000, M = 1000K, and so on up to P.
    #[arg(short = 'H', long)]
    human: bool,

    /// The number of threads used to measure directories
    ///
    /// A value of 0 uses one thread per CPU core.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Emit debug logs, including entries skipped while measuring
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Resolve the directories to measure.
    ///
    /// Priority: `--dirs` > config file `dirs`. The raw `--dirs` value is
    /// split on every comma; an empty value means no directories at all.
    #[must_use]
    pub fn directories(&self, config: &FileConfig) -> Vec<PathBuf> {
        match &self.dirs {
            Some(raw) if raw.is_empty() => Vec::new(),
            Some(raw) => raw.split(',').map(PathBuf::from).collect(),
            None => config.expanded_dirs().unwrap_or_default(),
        }
    }

    /// Extract the run options from CLI args and config file.
    ///
    /// - **recursive**, **human**, **verbose**: CLI flag `||` config value `||` `false`
    /// - **threads**: CLI > config > `0`
    #[must_use]
    pub fn size_options(&self, config: &FileConfig) -> SizeOptions {
        SizeOptions {
            recursive: self.recursive || config.reporting.recursive.unwrap_or(false),
            human: self.human || config.reporting.human.unwrap_or(false),
            threads: self.threads.or(config.scanning.threads).unwrap_or(0),
            verbose: self.verbose || config.scanning.verbose.unwrap_or(false),
        }
    }
}

/// Rewrite `-dirs`, `-dirs=a,b`, `-human`, ... into their `--` forms.
///
/// Every other argument passes through untouched, including the program
/// name and anything after a bare `--`.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_separator = false;

    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_separator = true;
                return arg;
            }

            let Some(flag) = text.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);

            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
