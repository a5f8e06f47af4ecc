//! apitester Domain - Core business types
//!
//! This crate defines the domain model for the apitester HTTP client.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod request;
pub mod response;
pub mod testing;

pub use collection::{Collection, SavedRequest, validate_name};
pub use environment::Environment;
pub use error::{DomainError, DomainResult};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryEntry, RequestHistory};
pub use request::{BasicAuth, BodyPayload, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{Assertion, AssertionResult, FailureReason, TestResults};
