//! File-based environment repository implementation.
//!
//! Named environments are plain `KEY=VALUE` env files:
//! ```text
//! <data_dir>/
//!   active_env
//!   environments/
//!     development.env
//!     production.env
//! ```

use std::path::{Path, PathBuf};

use apitester_application::ports::{
    EnvironmentError, EnvironmentRepository, FileSystem, FileSystemError,
};
use apitester_domain::Environment;
use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;

const ENV_EXTENSION: &str = "env";

/// Parses dotenv-formatted bytes into an environment.
///
/// The process environment is left untouched.
///
/// # Errors
///
/// Returns `EnvironmentError::Parse` on a malformed line.
pub fn parse_env(content: &[u8]) -> Result<Environment, EnvironmentError> {
    dotenvy::from_read_iter(content)
        .collect::<Result<Environment, _>>()
        .map_err(|e| EnvironmentError::Parse(e.to_string()))
}

fn io_error(e: &FileSystemError) -> EnvironmentError {
    EnvironmentError::Io(e.to_string())
}

/// File-based environment repository.
#[derive(Debug, Clone)]
pub struct FileEnvironmentRepository<F> {
    fs: F,
    environments_dir: PathBuf,
    active_file: PathBuf,
}

impl<F: FileSystem> FileEnvironmentRepository<F> {
    /// Creates a repository rooted at the configured paths.
    pub fn new(fs: F, config: &AppConfig) -> Self {
        Self {
            fs,
            environments_dir: config.environments_dir.clone(),
            active_file: config.active_env_file.clone(),
        }
    }

    fn environment_path(&self, name: &str) -> PathBuf {
        self.environments_dir.join(format!("{name}.{ENV_EXTENSION}"))
    }

    async fn read_env(&self, path: &Path) -> Result<Option<Environment>, EnvironmentError> {
        match self.fs.read_file(path).await {
            Ok(content) => parse_env(&content).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(io_error(&e)),
        }
    }
}

#[async_trait]
impl<F: FileSystem> EnvironmentRepository for FileEnvironmentRepository<F> {
    async fn load(&self, name: &str) -> Result<Environment, EnvironmentError> {
        let path = self.environment_path(name);
        let env = self
            .read_env(&path)
            .await?
            .ok_or_else(|| EnvironmentError::NotFound(name.to_string()))?;

        let mut named = Environment::named(name);
        named.overlay(env);
        Ok(named)
    }

    async fn load_file(&self, path: &Path) -> Result<Option<Environment>, EnvironmentError> {
        self.read_env(path).await
    }

    async fn import(&self, name: &str, source: &Path) -> Result<(), EnvironmentError> {
        if !self.fs.is_file(source).await {
            return Err(EnvironmentError::SourceNotFound(source.display().to_string()));
        }
        let target = self.environment_path(name);
        self.fs
            .copy_file(source, &target)
            .await
            .map_err(|e| io_error(&e))?;
        debug!(source = %source.display(), target = %target.display(), "environment saved");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, EnvironmentError> {
        let entries = match self.fs.read_dir(&self.environments_dir).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&e)),
        };

        let mut names: Vec<String> = entries
            .iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == ENV_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(ToString::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn active(&self) -> Result<Option<String>, EnvironmentError> {
        match self.fs.read_file_string(&self.active_file).await {
            Ok(content) => {
                let name = content.trim();
                Ok((!name.is_empty()).then(|| name.to_string()))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(io_error(&e)),
        }
    }

    async fn set_active(&self, name: &str) -> Result<(), EnvironmentError> {
        self.fs
            .write_file(&self.active_file, format!("{name}\n").as_bytes())
            .await
            .map_err(|e| io_error(&e))
    }
}
