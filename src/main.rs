//! # dir-sizer
//!
//! A small CLI tool that computes the total on-disk size of a set of
//! directories, measuring every directory tree in parallel.
//!
//! ## Usage
//!
//! ```bash
//! # Size of two directories and their cumulative total
//! dir-sizer --dirs ~/Projects,~/Downloads
//!
//! # Also report every subdirectory, with K/M/G suffixes
//! dir-sizer --dirs ~/Projects --recursive --human
//!
//! # Single-dash spellings are accepted too
//! dir-sizer -dirs ~/Projects -human
//! ```

mod cli;

use std::process::exit;

use anyhow::{Result, bail};
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dir_sizer::{
    config::FileConfig, dispatcher::Dispatcher, output::EMPTY_DIRS_MESSAGE,
    utils::setup_logging,
};
use log::debug;

/// Entry point for the dir-sizer application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, layers them over the config file, sizes the thread pool
/// and hands the requested directories to the dispatcher.
///
/// # Errors
///
/// Returns errors from thread-pool configuration or from the `config`
/// subcommands.
fn inner_main() -> Result<()> {
    let args = Cli::parse_args();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let options = args.size_options(&file_config);
    setup_logging(options.verbose);

    let dirs = args.directories(&file_config);
    if dirs.is_empty() {
        println!("{EMPTY_DIRS_MESSAGE}");
        return Ok(());
    }

    if options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build_global()?;
    }

    debug!("Measuring {} path(s) with {options:?}", dirs.len());
    let summary = Dispatcher::new(&options).run(&dirs);
    debug!(
        "Finished: {} measured, {} missing, {} not directories",
        summary.results.len(),
        summary.errors.len(),
        summary.skipped.len()
    );

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dir-sizer configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directories to measure when --dirs is not given
# dirs = ["~/Projects"]

[reporting]
# Print the size of every subdirectory as it completes
# recursive = false

# Format sizes with decimal K/M/G/T/P suffixes
# human = false

[scanning]
# Number of threads used to measure directories (0 = all CPU cores)
# threads = 0

# Emit debug logs
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dirs = match config.dirs.as_deref() {
        Some(v) if !v.is_empty() => {
            let items: Vec<String> = v.iter().map(|p| format!("\"{}\"", p.display())).collect();
            format!("[{}]", items.join(", "))
        }
        _ => "[]  (default)".to_string(),
    };
    let threads = config.scanning.threads.map_or_else(
        || "0 (all cores)  (default)".to_string(),
        |v| v.to_string(),
    );

    format!(
        "\
dirs      = {dirs}

[reporting]
recursive = {recursive}
human     = {human}

[scanning]
threads   = {threads}
verbose   = {verbose}",
        recursive = show_bool(config.reporting.recursive, false),
        human = show_bool(config.reporting.human, false),
        verbose = show_bool(config.scanning.verbose, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.dirs.is_none());
        assert!(config.reporting.recursive.is_none());
        assert!(config.reporting.human.is_none());
        assert!(config.scanning.threads.is_none());
        assert!(config.scanning.verbose.is_none());
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let text = format_config(&FileConfig::default());

        assert!(text.contains("dirs      = []  (default)"));
        assert!(text.contains("recursive = false  (default)"));
        assert!(text.contains("threads   = 0 (all cores)  (default)"));
    }

    #[test]
    fn test_format_config_shows_values() {
        let config: FileConfig =
            toml::from_str("dirs = [\"/srv\"]\n[reporting]\nhuman = true\n").unwrap();
        let text = format_config(&config);

        assert!(text.contains("dirs      = [\"/srv\"]"));
        assert!(text.contains("human     = true"));
    }
}
