//! # dir-sizer
//!
//! Measure the total on-disk size of a set of directories.
//!
//! Each requested directory is measured by an aggregation task that sums its
//! own files and spawns one child task per subdirectory, so a whole tree is
//! reduced in parallel. Results flow back up through per-task reply channels
//! and the dispatcher adds the top-level results into a cumulative total.
//!
//! ## Main Parts
//!
//! - [`dispatcher`] - validates requested paths and collects their results
//! - [`aggregator`] - the recursive, concurrent directory-size task
//! - [`output`] - the report lines printed to stdout
//! - [`config`] - run options and the persistent config file
//! - [`utils`] - size formatting and logger setup

pub mod aggregator;
pub mod config;
pub mod dispatcher;
pub mod output;
pub mod utils;

pub use aggregator::{Aggregator, DirectoryResult};
pub use config::{FileConfig, SizeOptions};
pub use dispatcher::{Dispatcher, PendingError, Summary};
