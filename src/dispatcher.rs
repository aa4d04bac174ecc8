//! Top-level dispatch and result collection.
//!
//! The dispatcher validates every requested path, launches one aggregation
//! task per valid directory and then collects exactly one message per
//! counted path, whichever of results or errors is ready first.

use std::fs;
use std::path::PathBuf;

use crossbeam_channel::{bounded, select, unbounded};
use log::error;

use crate::aggregator::{Aggregator, DirectoryResult};
use crate::config::SizeOptions;
use crate::output::{Output, missing_directory_message};

/// A requested path that failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingError {
    /// The requested path
    pub path: PathBuf,

    /// Message logged for it
    pub message: String,
}

/// Everything collected by one [`Dispatcher::run`].
#[derive(Debug, Default)]
pub struct Summary {
    /// Results of requested directories, in arrival order
    pub results: Vec<DirectoryResult>,

    /// Requested paths that do not exist, in arrival order
    pub errors: Vec<PendingError>,

    /// Requested paths that exist but are not directories
    pub skipped: Vec<PathBuf>,

    /// Sum of every entry in `results`
    pub total: u64,
}

/// One message taken from the collection loop.
enum Message {
    Result(DirectoryResult),
    Error(PendingError),
}

/// Validates requested paths and fans out one aggregation task per directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dispatcher {
    aggregator: Aggregator,
    output: Output,
}

impl Dispatcher {
    /// Create a dispatcher from the run options.
    #[must_use]
    pub const fn new(options: &SizeOptions) -> Self {
        Self {
            aggregator: Aggregator::new(options),
            output: Output::new(options.human),
        }
    }

    /// Enable or disable quiet mode (suppresses every stdout line).
    ///
    /// Missing paths are still reported through the log.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.aggregator = self.aggregator.with_quiet(quiet);
        self.output = self.output.with_quiet(quiet);
        self
    }

    /// Measure every requested path and print per-path and cumulative totals.
    ///
    /// Paths are checked one after the other before their task starts:
    /// - a path that cannot be stat'ed becomes a [`PendingError`] and counts
    ///   toward the messages to collect
    /// - a path that is not a directory is reported inline and not counted
    /// - a directory gets its own aggregation task on the rayon pool
    ///
    /// The call returns once one message per counted path was received.
    #[must_use]
    pub fn run(&self, paths: &[PathBuf]) -> Summary {
        let (result_tx, result_rx) = bounded::<DirectoryResult>(0);
        let (error_tx, error_rx) = unbounded::<PendingError>();
        let mut summary = Summary::default();
        let mut expected = 0usize;

        for path in paths {
            match fs::metadata(path) {
                Err(_) => {
                    expected += 1;
                    let pending = PendingError {
                        path: path.clone(),
                        message: missing_directory_message(path),
                    };
                    // The receiver lives until the end of this function
                    let _ = error_tx.send(pending);
                }
                Ok(metadata) if !metadata.is_dir() => {
                    self.output.not_a_directory(path);
                    summary.skipped.push(path.clone());
                }
                Ok(_) => {
                    expected += 1;
                    self.aggregator.aggregate(path, &result_tx);
                }
            }
        }

        for _ in 0..expected {
            let message = select! {
                recv(result_rx) -> msg => msg.map(Message::Result),
                recv(error_rx) -> msg => msg.map(Message::Error),
            };

            match message {
                Ok(Message::Result(result)) => {
                    self.output.directory(&result);
                    summary.total = summary.total.saturating_add(result.size);
                    summary.results.push(result);
                }
                Ok(Message::Error(pending)) => {
                    error!("{}", pending.message);
                    summary.errors.push(pending);
                }
                Err(_) => break,
            }
        }

        // Held until here so neither channel reads as disconnected mid-loop
        drop(result_tx);
        drop(error_tx);

        self.output.cumulative(summary.total);
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn quiet_dispatcher() -> Dispatcher {
        Dispatcher::new(&SizeOptions::default()).with_quiet(true)
    }

    fn create_file(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x".repeat(len)).unwrap();
    }

    #[test]
    fn test_run_with_no_paths() {
        let summary = quiet_dispatcher().run(&[]);

        assert!(summary.results.is_empty());
        assert!(summary.errors.is_empty());
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn test_run_sums_top_level_results() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        create_file(&a.join("f.bin"), 500);
        create_file(&a.join("sub").join("g.bin"), 2_000);
        create_file(&b.join("f.bin"), 40);

        let summary = quiet_dispatcher().run(&[a.clone(), b.clone()]);

        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.total, 2_540);
        assert_eq!(
            summary.total,
            summary.results.iter().map(|r| r.size).sum::<u64>()
        );

        let size_for = |p: &Path| {
            summary
                .results
                .iter()
                .find(|r| r.path == p)
                .map(|r| r.size)
                .unwrap()
        };
        assert_eq!(size_for(&a), 2_500);
        assert_eq!(size_for(&b), 40);
    }

    #[test]
    fn test_run_records_missing_path_once() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("present");
        create_file(&present.join("f.bin"), 10);
        let missing = temp.path().join("missing");

        let summary = quiet_dispatcher().run(&[missing.clone(), present]);

        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].path, missing);
        assert!(summary.errors[0].message.contains("does not exist"));
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.total, 10);
    }

    #[test]
    fn test_run_skips_regular_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        create_file(&file, 999);
        let dir = temp.path().join("dir");
        create_file(&dir.join("f.bin"), 1);

        let summary = quiet_dispatcher().run(&[file.clone(), dir]);

        assert_eq!(summary.skipped, vec![file]);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_run_only_errors() {
        let temp = TempDir::new().unwrap();
        let paths = vec![temp.path().join("x"), temp.path().join("y")];

        let summary = quiet_dispatcher().run(&paths);

        assert_eq!(summary.errors.len(), 2);
        assert!(summary.results.is_empty());
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn test_run_same_directory_twice_counts_twice() {
        let temp = TempDir::new().unwrap();
        create_file(&temp.path().join("f.bin"), 5);
        let path = temp.path().to_path_buf();

        let summary = quiet_dispatcher().run(&[path.clone(), path]);

        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.total, 10);
    }

    #[test]
    fn test_run_many_directories() {
        let temp = TempDir::new().unwrap();
        let paths: Vec<_> = (0..32)
            .map(|i| {
                let dir = temp.path().join(format!("d{i}"));
                create_file(&dir.join("nested").join("f.bin"), 3);
                dir
            })
            .collect();

        let summary = quiet_dispatcher().run(&paths);

        assert_eq!(summary.results.len(), 32);
        assert_eq!(summary.total, 96);
    }
}
