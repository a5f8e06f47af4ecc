//! Save environment use case

use std::path::Path;

use apitester_domain::validate_name;

use crate::ports::{EnvironmentError, EnvironmentRepository};

/// Copies an env file into the named environment store.
pub struct SaveEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> SaveEnvironment<R> {
    /// Creates a new `SaveEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `EnvironmentError::SourceNotFound` if `source` is missing, or
    /// `EnvironmentError::Invalid` if the name cannot be used as a file name.
    pub async fn execute(&self, name: &str, source: &Path) -> Result<(), EnvironmentError> {
        validate_name(name).map_err(|e| EnvironmentError::Invalid(e.to_string()))?;
        self.repository.import(name, source).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::mocks::MockEnvironmentRepository;
    use apitester_domain::Environment;

    #[tokio::test]
    async fn test_save_imports_file() {
        let repo = MockEnvironmentRepository::default();
        repo.add_file("prod.env", Environment::new().with("HOST", "prod"));
        let use_case = SaveEnvironment::new(repo);

        use_case.execute("prod", Path::new("prod.env")).await.unwrap();

        let saved = use_case.repository.load("prod").await.unwrap();
        assert_eq!(saved.get("HOST"), Some("prod"));
    }

    #[tokio::test]
    async fn test_missing_source() {
        let use_case = SaveEnvironment::new(MockEnvironmentRepository::default());
        let result = use_case.execute("prod", Path::new("nope.env")).await;
        assert!(matches!(result, Err(EnvironmentError::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let use_case = SaveEnvironment::new(MockEnvironmentRepository::default());
        let result = use_case.execute("a/b", Path::new("x.env")).await;
        assert!(matches!(result, Err(EnvironmentError::Invalid(_))));
    }
}
