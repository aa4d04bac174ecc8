//! Configuration for sizing runs.
//!
//! - [`SizeOptions`] - the resolved options a run executes with
//! - [`FileConfig`] - persistent defaults read from `config.toml`

pub mod file;
pub mod scan;

pub use file::FileConfig;
pub use scan::SizeOptions;
