//! Human-readable report lines.
//!
//! Every line the tool prints is rendered here as a plain `String`, so the
//! wording can be checked without capturing stdout. Colouring is applied only
//! at print time, by [`Output`].

use std::path::Path;

use colored::Colorize;

use crate::aggregator::DirectoryResult;
use crate::utils::format_size;

/// Message printed when no directories were requested.
pub const EMPTY_DIRS_MESSAGE: &str =
    "Error: Please specify a list of directories separated by commas.";

/// Line reporting the total size of a requested directory.
#[must_use]
pub fn directory_line(result: &DirectoryResult, human: bool) -> String {
    format!(
        "The size of the directory \"{}\" is {} bytes.",
        result.path.display(),
        format_size(result.size, human)
    )
}

/// Line reporting the size of a subdirectory found during recursion.
#[must_use]
pub fn subdirectory_line(result: &DirectoryResult, human: bool) -> String {
    format!(
        "The size of the subdirectory \"{}\" is {} bytes.",
        result.path.display(),
        format_size(result.size, human)
    )
}

/// Final line reporting the sum over all requested directories.
#[must_use]
pub fn cumulative_line(total: u64, human: bool) -> String {
    format!(
        "The cumulative size of all specified directories is {} bytes.",
        format_size(total, human)
    )
}

/// Inline error for a requested path that exists but is not a directory.
///
/// Only the final path component is shown.
#[must_use]
pub fn not_a_directory_line(path: &Path) -> String {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    format!("Error: \"{name}\" is not a directory. Please specify directories only!")
}

/// Error message for a requested path that does not exist.
#[must_use]
pub fn missing_directory_message(path: &Path) -> String {
    format!("Error: The directory \"{}\" does not exist.", path.display())
}

/// Prints report lines to stdout unless quiet.
///
/// Shared by the dispatcher and every aggregation task; it is `Copy` so each
/// spawned task carries its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Output {
    human: bool,
    quiet: bool,
}

impl Output {
    /// Create a printer formatting sizes in human mode or not.
    #[must_use]
    pub const fn new(human: bool) -> Self {
        Self { human, quiet: false }
    }

    /// Enable or disable quiet mode (nothing is written to stdout).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Print the total for a requested directory.
    pub fn directory(&self, result: &DirectoryResult) {
        if !self.quiet {
            println!("{}", directory_line(result, self.human));
        }
    }

    /// Print the size of a subdirectory.
    pub fn subdirectory(&self, result: &DirectoryResult) {
        if !self.quiet {
            println!("{}", subdirectory_line(result, self.human));
        }
    }

    /// Print the cumulative total.
    pub fn cumulative(&self, total: u64) {
        if !self.quiet {
            println!("{}", cumulative_line(total, self.human).bold());
        }
    }

    /// Print the inline error for a non-directory path.
    pub fn not_a_directory(&self, path: &Path) {
        if !self.quiet {
            println!("{}", not_a_directory_line(path).red());
        }
    }
}
