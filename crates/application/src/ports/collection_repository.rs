//! Collection repository port
//!
//! Collections are stored as one file per collection, keyed by name.

use std::future::Future;

use apitester_domain::Collection;

/// Errors that can occur during collection operations.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Collection not found.
    #[error("Collection '{0}' not found")]
    NotFound(String),

    /// The collection name cannot be used as a file name.
    #[error("Invalid collection name: {0}")]
    InvalidName(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// One row of the collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    /// The collection's stored name.
    pub name: String,
    /// Number of saved requests.
    pub request_count: usize,
}

/// Repository trait for collection persistence.
pub trait CollectionRepository: Send + Sync {
    /// Loads a collection by name.
    ///
    /// # Errors
    /// Returns `CollectionError::NotFound` if no file exists for the name.
    fn load(&self, name: &str) -> impl Future<Output = Result<Collection, CollectionError>> + Send;

    /// Saves a collection, overwriting any previous file with the same name.
    ///
    /// # Errors
    /// Returns an error if the name is invalid or the file cannot be written.
    fn save(
        &self,
        collection: &Collection,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Lists all stored collections, sorted by file name.
    ///
    /// Files that cannot be parsed are skipped.
    ///
    /// # Errors
    /// Returns an error if the collections directory cannot be read.
    fn list(&self) -> impl Future<Output = Result<Vec<CollectionSummary>, CollectionError>> + Send;

    /// Checks if a collection exists.
    fn exists(&self, name: &str) -> impl Future<Output = bool> + Send;
}
