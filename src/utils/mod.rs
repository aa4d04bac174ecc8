//! Utility functions and helpers.
//!
//! This module contains the size formatter shared by every printed line and
//! the logger setup used by the binary.

pub mod logger;
pub mod size;

pub use logger::setup_logging;
pub use size::format_size;
