use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use apitester_application::ports::EnvironmentError;
use apitester_application::{ListEnvironments, SaveEnvironment, SwitchEnvironment};
use console::style;

use super::Context;

pub async fn save(ctx: &Context, name: &str, file: &Path) -> Result<ExitCode> {
    match SaveEnvironment::new(ctx.environments())
        .execute(name, file)
        .await
    {
        Ok(()) => ctx.success(&format!("Environment '{name}' saved!"))?,
        Err(EnvironmentError::SourceNotFound(_)) => {
            ctx.failure(&format!("File '{}' not found!", file.display()))?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(ExitCode::SUCCESS)
}

/// Persists `name` as the active environment once it is known to exist.
pub async fn switch(ctx: &Context, name: &str) -> Result<ExitCode> {
    match SwitchEnvironment::new(ctx.environments()).execute(name).await {
        Ok(()) => ctx.success(&format!("Switched to environment: {name}"))?,
        Err(EnvironmentError::NotFound(_)) => {
            ctx.failure(&format!("Environment '{name}' not found!"))?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn list(ctx: &Context) -> Result<ExitCode> {
    let output = ListEnvironments::new(ctx.environments()).execute().await?;
    if output.environments.is_empty() {
        ctx.warn("No environments found")?;
        return Ok(ExitCode::SUCCESS);
    }

    for name in &output.environments {
        if output.active.as_deref() == Some(name.as_str()) {
            ctx.print(style(format!("* {name} (active)")).green().bold().to_string())?;
        } else {
            ctx.print(format!("  {name}"))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
