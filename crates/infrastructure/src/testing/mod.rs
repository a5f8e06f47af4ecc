//! Evaluates `--test` assertions against a received response.

mod runner;

pub use runner::{TestRunner, lookup_path, stringify};
