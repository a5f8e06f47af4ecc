//! Command handlers.
//!
//! Each handler builds the adapters it needs from a shared [`Context`], runs
//! one use case and prints the outcome. Conditions the user can fix (a missing
//! collection, an unknown environment) are reported and exit successfully.

mod collections;
mod environments;
mod history;
mod request;

use std::process::ExitCode;

use anyhow::Result;
use apitester_application::{LoadEnvironment, LoadEnvironmentInput, RecordHistory};
use apitester_domain::Environment;
use apitester_infrastructure::{
    AppConfig, FileEnvironmentRepository, FileHistoryRepository, FileSystemCollectionRepository,
    SystemClock, TokioFileSystem,
};
use console::{Term, style};

use crate::cli::{Cli, Commands};

/// Everything a handler needs for one invocation.
pub struct Context {
    config: AppConfig,
    selected_env: Option<String>,
    fs: TokioFileSystem,
    out: Term,
}

impl Context {
    /// Builds the context for `cli`, resolving paths from the process environment.
    #[must_use]
    pub fn new(cli: &Cli) -> Self {
        Self {
            config: AppConfig::from_env().with_env_file(&cli.env_file),
            selected_env: cli.env.clone(),
            fs: TokioFileSystem::new(),
            out: Term::stdout(),
        }
    }

    fn collections(&self) -> FileSystemCollectionRepository<TokioFileSystem> {
        FileSystemCollectionRepository::new(self.fs, &self.config)
    }

    fn environments(&self) -> FileEnvironmentRepository<TokioFileSystem> {
        FileEnvironmentRepository::new(self.fs, &self.config)
    }

    fn history(&self) -> RecordHistory<FileHistoryRepository<TokioFileSystem>, SystemClock> {
        RecordHistory::new(FileHistoryRepository::new(self.fs, &self.config), SystemClock)
            .with_limit(self.config.history_limit)
    }

    /// Layers the process environment, the default env file and the selected
    /// named environment.
    async fn environment(&self) -> Result<Environment> {
        let process: Environment = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        let output = LoadEnvironment::new(self.environments())
            .execute(LoadEnvironmentInput {
                process,
                env_file: self.config.default_env_file.clone(),
                selected: self.selected_env.clone(),
            })
            .await?;

        if let Some(name) = output.missing {
            self.warn(&format!("Environment '{name}' not found, using defaults"))?;
        }
        Ok(output.environment)
    }

    fn print(&self, line: impl AsRef<str>) -> Result<()> {
        self.out.write_line(line.as_ref())?;
        Ok(())
    }

    fn success(&self, message: &str) -> Result<()> {
        self.print(style(message).green().to_string())
    }

    fn warn(&self, message: &str) -> Result<()> {
        self.print(style(message).yellow().to_string())
    }

    fn failure(&self, message: &str) -> Result<()> {
        self.print(style(message).red().to_string())
    }
}

/// Runs the parsed command line.
///
/// # Errors
///
/// Returns an error when a command cannot complete, for example on a network
/// failure or an unwritable data directory.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = Context::new(&cli);
    tracing::debug!(data_dir = %ctx.config.data_dir.display(), "starting");

    match cli.command {
        Commands::Request(args) => request::send(&ctx, args).await,
        Commands::List => collections::list(&ctx).await,
        Commands::Export {
            name,
            format,
            output,
        } => collections::export(&ctx, &name, format.into(), output).await,
        Commands::ImportCollection { file, name } => {
            collections::import(&ctx, &file, name).await
        }
        Commands::History => history::show(&ctx).await,
        Commands::RunCollection { name } => collections::run(&ctx, &name).await,
        Commands::SaveEnv { name, file } => environments::save(&ctx, &name, &file).await,
        Commands::UseEnv { name } => environments::switch(&ctx, &name).await,
        Commands::ListEnvs => environments::list(&ctx).await,
    }
}
