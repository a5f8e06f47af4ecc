//! JSON helpers for everything written under the data directory.
//!
//! Output uses 2-space indentation and ends with a newline so the files
//! stay readable and diff cleanly.

mod json;

pub use json::*;
