//! Save to collection use case

use apitester_domain::{Collection, SavedRequest};
use tracing::debug;

use crate::ports::{CollectionError, CollectionRepository};

/// Outcome of appending a request to a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutput {
    /// Whether the collection did not exist before.
    pub created: bool,
    /// Number of requests after the append.
    pub request_count: usize,
}

/// Appends a request definition to a named collection, creating it if missing.
pub struct SaveToCollection<R> {
    repository: R,
}

impl<R: CollectionRepository> SaveToCollection<R> {
    /// Creates a new `SaveToCollection` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the name is invalid or the collection cannot be
    /// read or written.
    pub async fn execute(
        &self,
        name: &str,
        request: SavedRequest,
    ) -> Result<SaveOutput, CollectionError> {
        let (mut collection, created) = match self.repository.load(name).await {
            Ok(collection) => (collection, false),
            Err(CollectionError::NotFound(_)) => (
                Collection::new(name).map_err(|e| CollectionError::InvalidName(e.to_string()))?,
                true,
            ),
            Err(e) => return Err(e),
        };

        collection.push(request);
        self.repository.save(&collection).await?;
        debug!(collection = name, created, "request saved");

        Ok(SaveOutput {
            created,
            request_count: collection.len(),
        })
    }

    /// Stores a whole collection, replacing any existing one with the same name.
    ///
    /// # Errors
    /// Returns an error if the name is invalid or the file cannot be written.
    pub async fn replace(&self, collection: &Collection) -> Result<(), CollectionError> {
        apitester_domain::validate_name(&collection.name)
            .map_err(|e| CollectionError::InvalidName(e.to_string()))?;
        self.repository.save(collection).await
    }
}
