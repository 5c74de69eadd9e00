//! Settings module
//!
//! Loads conversion options from a file on disk.

pub mod options_file;

pub use options_file::{load_options, parse_options};
