//! File-backed repositories for collections, environments and history.

mod collection_repository;
mod environment_repository;
mod file_system;
mod history_repository;

pub use collection_repository::FileSystemCollectionRepository;
pub use environment_repository::{FileEnvironmentRepository, parse_env};
pub use file_system::TokioFileSystem;
pub use history_repository::FileHistoryRepository;
