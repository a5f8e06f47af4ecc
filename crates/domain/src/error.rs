//! Domain error types

use thiserror::Error;

/// Errors raised while parsing or validating user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A `key:value` or `key=value` pair could not be split.
    #[error("invalid pair '{input}': expected {separator} separator")]
    InvalidPair {
        /// The raw input.
        input: String,
        /// The separator that was expected.
        separator: char,
    },

    /// A collection or environment name is empty or unusable as a file name.
    #[error("invalid name: {0}")]
    InvalidName(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
