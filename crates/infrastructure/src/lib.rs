//! apitester Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus path configuration and
//! collection import/export.

pub mod adapters;
pub mod config;
pub mod exchange;
pub mod persistence;
pub mod serialization;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{AppConfig, DATA_DIR_ENV};
pub use exchange::{ExchangeError, ExchangeFormat, export_collection, import_collection};
pub use persistence::{
    FileEnvironmentRepository, FileHistoryRepository, FileSystemCollectionRepository,
    TokioFileSystem,
};
pub use serialization::{SerializationError, from_json, to_json_stable};
pub use testing::TestRunner;
