//! History repository port

use std::future::Future;

use apitester_domain::RequestHistory;

/// Errors that can occur while reading or writing history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for request history persistence.
pub trait HistoryRepository: Send + Sync {
    /// Loads the stored history.
    ///
    /// Returns `Ok(None)` when no history has been recorded yet.
    ///
    /// # Errors
    /// Returns an error if the history file exists but cannot be read or parsed.
    fn load(&self) -> impl Future<Output = Result<Option<RequestHistory>, HistoryError>> + Send;

    /// Overwrites the stored history.
    ///
    /// # Errors
    /// Returns an error if the history cannot be written.
    fn save(&self, history: &RequestHistory)
    -> impl Future<Output = Result<(), HistoryError>> + Send;
}
