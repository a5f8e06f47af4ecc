//! Environment repository port
//!
//! Defines the interface for named environment persistence and the
//! active-environment marker.

use async_trait::async_trait;
use std::path::Path;

use apitester_domain::Environment;

/// Errors that can occur during environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// Environment not found.
    #[error("Environment '{0}' not found")]
    NotFound(String),

    /// Source file for an import does not exist.
    #[error("File '{0}' not found")]
    SourceNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// The env file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid environment name.
    #[error("Invalid environment: {0}")]
    Invalid(String),
}

/// Repository trait for environment persistence.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Loads a named environment.
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if the environment doesn't exist.
    async fn load(&self, name: &str) -> Result<Environment, EnvironmentError>;

    /// Loads an unnamed environment from an arbitrary env file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    async fn load_file(&self, path: &Path) -> Result<Option<Environment>, EnvironmentError>;

    /// Stores the env file at `source` under `name`.
    ///
    /// # Errors
    /// Returns `EnvironmentError::SourceNotFound` if `source` doesn't exist.
    async fn import(&self, name: &str, source: &Path) -> Result<(), EnvironmentError>;

    /// Lists all saved environment names, sorted.
    async fn list(&self) -> Result<Vec<String>, EnvironmentError>;

    /// Returns the persisted active environment name, if any.
    async fn active(&self) -> Result<Option<String>, EnvironmentError>;

    /// Persists `name` as the active environment.
    async fn set_active(&self, name: &str) -> Result<(), EnvironmentError>;

    /// Checks if an environment exists.
    async fn exists(&self, name: &str) -> Result<bool, EnvironmentError> {
        match self.load(name).await {
            Ok(_) => Ok(true),
            Err(EnvironmentError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
