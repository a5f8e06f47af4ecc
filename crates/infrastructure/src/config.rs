//! Filesystem layout of the tool's persisted state.

use std::path::{Path, PathBuf};

use apitester_domain::DEFAULT_HISTORY_LIMIT;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "API_TESTER_HOME";

const DEFAULT_DIR_NAME: &str = ".api_tester";
const DEFAULT_ENV_FILE: &str = ".env";

/// Paths and limits for one invocation.
///
/// Built once at startup and passed to every component that touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of all persisted state.
    pub data_dir: PathBuf,
    /// One `<name>.json` file per collection.
    pub collections_dir: PathBuf,
    /// One `<name>.env` file per named environment.
    pub environments_dir: PathBuf,
    /// Newest-first JSON array of history entries.
    pub history_file: PathBuf,
    /// Holds the name chosen with `use-env`.
    pub active_env_file: PathBuf,
    /// Env file loaded on every invocation when present.
    pub default_env_file: PathBuf,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
}

impl AppConfig {
    /// Uses `$API_TESTER_HOME` if set, else `~/.api_tester`.
    ///
    /// Falls back to a relative `.api_tester` when no home directory is known.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME));
        Self::with_root(data_dir)
    }

    /// Lays out every path under `data_dir`.
    #[must_use]
    pub fn with_root(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            collections_dir: data_dir.join("collections"),
            environments_dir: data_dir.join("environments"),
            history_file: data_dir.join("history.json"),
            active_env_file: data_dir.join("active_env"),
            default_env_file: PathBuf::from(DEFAULT_ENV_FILE),
            history_limit: DEFAULT_HISTORY_LIMIT,
            data_dir,
        }
    }

    /// Replaces the default env file path.
    #[must_use]
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.default_env_file = path.as_ref().to_path_buf();
        self
    }
}
