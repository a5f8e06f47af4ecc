//! Environment domain types

mod variables;

pub use variables::Environment;
