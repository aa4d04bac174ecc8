//! Runtime options for a sizing run.
//!
//! This module defines the options that control how directories are measured
//! and what gets reported while the measurement runs.

/// Configuration for directory sizing behavior.
///
/// Built by the command-line layer from CLI arguments and the config file,
/// then shared (by copy) with the dispatcher and every aggregation task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeOptions {
    /// Print the size of every subdirectory as soon as it is known
    pub recursive: bool,

    /// Format sizes with decimal K/M/G/T/P suffixes
    pub human: bool,

    /// Number of threads in the aggregation pool (0 = one per CPU core)
    pub threads: usize,

    /// Whether to emit debug logs, including skipped entries
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_options_default() {
        let opts = SizeOptions::default();

        assert!(!opts.recursive);
        assert!(!opts.human);
        assert_eq!(opts.threads, 0);
        assert!(!opts.verbose);
    }

    #[test]
    fn test_size_options_copy() {
        let original = SizeOptions {
            recursive: true,
            human: true,
            threads: 4,
            verbose: false,
        };
        let copied = original;

        assert_eq!(original, copied);
    }
}
