//! Log stream setup.
//!
//! Errors about requested paths (and debug traces of skipped entries) go
//! through the `log` facade; this module wires it to `env_logger` on stderr.

use std::io::Write;

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};

/// Crate name as it appears in log targets (`dir_sizer::dispatcher`, ...).
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Environment variable holding `env_logger` filter directives.
const FILTER_ENV: &str = "RUST_LOG";

/// Initialize the global logger.
///
/// Dependencies log at `Warn` and above; this crate logs at `Info`, or at
/// `Debug` when `verbose` is set. A non-empty `RUST_LOG` replaces both
/// defaults entirely, so `RUST_LOG=off` silences everything. Calling this more
/// than once is a no-op.
pub fn setup_logging(verbose: bool) {
    let env_filters = std::env::var(FILTER_ENV).ok();
    let _ = builder(verbose, env_filters.as_deref()).try_init();
}

fn builder(verbose: bool, env_filters: Option<&str>) -> Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    match env_filters {
        Some(filters) if !filters.trim().is_empty() => {
            builder.parse_filters(filters);
        }
        _ => {
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module(CRATE_TARGET, level);
        }
    }

    builder.format(|buf, record| {
        let name = env!("CARGO_PKG_NAME");
        let line = match record.level() {
            Level::Error => format!("[{} {}] {}", name.cyan(), "ERROR".red(), record.args()),
            Level::Warn => format!("[{} {}] {}", name.cyan(), "WARN".yellow(), record.args()),
            Level::Debug | Level::Trace => format!(
                "[{} {}] {}",
                name.cyan(),
                record.target().white(),
                record.args()
            ),
            Level::Info => format!("[{}] {}", name.cyan(), record.args()),
        };
        writeln!(buf, "{line}")
    });
    builder
}
