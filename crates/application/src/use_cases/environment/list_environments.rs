//! List environments use case

use crate::ports::{EnvironmentError, EnvironmentRepository};

/// Output containing the list of environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEnvironmentsOutput {
    /// Saved environment names, sorted.
    pub environments: Vec<String>,
    /// The persisted active environment, if any.
    pub active: Option<String>,
}

/// Lists all saved environments.
pub struct ListEnvironments<R> {
    repository: R,
}

impl<R: EnvironmentRepository> ListEnvironments<R> {
    /// Creates a new `ListEnvironments` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    #[allow(clippy::missing_errors_doc)]
    pub async fn execute(&self) -> Result<ListEnvironmentsOutput, EnvironmentError> {
        let environments = self.repository.list().await?;
        let active = self.repository.active().await?;
        Ok(ListEnvironmentsOutput {
            environments,
            active,
        })
    }
}
