//! Load environment use case

use std::path::PathBuf;

use apitester_domain::Environment;
use tracing::{debug, warn};

use crate::ports::{EnvironmentError, EnvironmentRepository};

/// Inputs for building the invocation's environment.
#[derive(Debug, Clone, Default)]
pub struct LoadEnvironmentInput {
    /// Process environment variables, the lowest layer.
    pub process: Environment,
    /// Path of the default env file. A missing file is skipped.
    pub env_file: PathBuf,
    /// Explicitly selected named environment. Falls back to the active one.
    pub selected: Option<String>,
}

/// The layered environment.
#[derive(Debug, Clone)]
pub struct LoadEnvironmentOutput {
    /// The merged environment.
    pub environment: Environment,
    /// The named environment that was applied, if any.
    pub applied: Option<String>,
    /// A requested named environment that does not exist.
    pub missing: Option<String>,
}

/// Builds the environment for one invocation.
///
/// Later layers overwrite earlier bindings for the same key.
pub struct LoadEnvironment<R> {
    repository: R,
}

impl<R: EnvironmentRepository> LoadEnvironment<R> {
    /// Creates a new `LoadEnvironment` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// An unreadable default env file or active marker is logged and skipped.
    ///
    /// # Errors
    /// Returns an error if the selected environment exists but cannot be read.
    pub async fn execute(
        &self,
        input: LoadEnvironmentInput,
    ) -> Result<LoadEnvironmentOutput, EnvironmentError> {
        let mut environment = input.process;

        match self.repository.load_file(&input.env_file).await {
            Ok(Some(file_env)) => {
                debug!(path = %input.env_file.display(), vars = file_env.len(), "loaded env file");
                environment.overlay(file_env);
            }
            Ok(None) => {}
            Err(e) => warn!(path = %input.env_file.display(), error = %e, "skipping env file"),
        }

        let selected = match input.selected {
            Some(name) => Some(name),
            None => self.repository.active().await.unwrap_or_else(|e| {
                warn!(error = %e, "could not read active environment");
                None
            }),
        };

        let Some(name) = selected else {
            return Ok(LoadEnvironmentOutput {
                environment,
                applied: None,
                missing: None,
            });
        };

        match self.repository.load(&name).await {
            Ok(named) => {
                debug!(environment = %name, vars = named.len(), "applied named environment");
                environment.overlay(named);
                Ok(LoadEnvironmentOutput {
                    environment,
                    applied: Some(name),
                    missing: None,
                })
            }
            Err(EnvironmentError::NotFound(_)) => Ok(LoadEnvironmentOutput {
                environment,
                applied: None,
                missing: Some(name),
            }),
            Err(e) => Err(e),
        }
    }
}
