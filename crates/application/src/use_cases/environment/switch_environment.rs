//! Switch environment use case

use tracing::info;

use crate::ports::{EnvironmentError, EnvironmentRepository};

/// Persists a named environment as the active one for later invocations.
pub struct SwitchEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> SwitchEnvironment<R> {
    /// Creates a new `SwitchEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case. Nothing is persisted for an unknown name.
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if the environment doesn't exist.
    pub async fn execute(&self, name: &str) -> Result<(), EnvironmentError> {
        if !self.repository.exists(name).await? {
            return Err(EnvironmentError::NotFound(name.to_string()));
        }
        self.repository.set_active(name).await?;
        info!(environment = name, "active environment changed");
        Ok(())
    }
}
