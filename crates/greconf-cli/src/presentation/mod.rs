//! Presentation helpers for CLI output.

mod tables;

pub use tables::{print_separator, truncate_string};
