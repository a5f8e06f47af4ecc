//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod assertion_evaluator;
mod clock;
mod collection_repository;
mod environment_repository;
mod file_system;
mod history_repository;
mod http_client;

pub use assertion_evaluator::AssertionEvaluator;
pub use clock::Clock;
pub use collection_repository::{CollectionError, CollectionRepository, CollectionSummary};
pub use environment_repository::{EnvironmentError, EnvironmentRepository};
pub use file_system::{FileSystem, FileSystemError};
pub use history_repository::{HistoryError, HistoryRepository};
pub use http_client::{HttpClient, HttpClientError};
