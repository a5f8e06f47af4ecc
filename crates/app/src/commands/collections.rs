use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use apitester_application::ports::{CollectionError, CollectionRepository};
use apitester_application::{ListCollections, RunCollection, RunEvent, SaveToCollection};
use apitester_domain::Collection;
use apitester_infrastructure::{
    ExchangeError, ExchangeFormat, ReqwestHttpClient, TestRunner, export_collection,
    import_collection,
};
use console::style;

use super::Context;
use crate::render;

/// Loads a collection, reporting a missing one instead of failing.
async fn load(ctx: &Context, name: &str) -> Result<Option<Collection>> {
    match ctx.collections().load(name).await {
        Ok(collection) => Ok(Some(collection)),
        Err(CollectionError::NotFound(_)) => {
            ctx.failure(&format!("Collection '{name}' not found!"))?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list(ctx: &Context) -> Result<ExitCode> {
    let summaries = ListCollections::new(ctx.collections()).execute().await?;
    if summaries.is_empty() {
        ctx.warn("No collections found")?;
        return Ok(ExitCode::SUCCESS);
    }

    let rows: Vec<Vec<String>> = summaries
        .into_iter()
        .map(|s| vec![s.name, s.request_count.to_string()])
        .collect();
    ctx.print(render::table(&["Collection Name", "Requests"], &rows))?;
    Ok(ExitCode::SUCCESS)
}

pub async fn export(
    ctx: &Context,
    name: &str,
    format: ExchangeFormat,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let Some(collection) = load(ctx, name).await? else {
        return Ok(ExitCode::SUCCESS);
    };

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{name}.{}", format.extension())));
    export_collection(&ctx.fs, &collection, format, &path).await?;
    ctx.success(&format!("Collection exported to {}", path.display()))?;
    Ok(ExitCode::SUCCESS)
}

/// Imports `file` as a collection. The name defaults to the file stem.
pub async fn import(ctx: &Context, file: &Path, name: Option<String>) -> Result<ExitCode> {
    let name = match name {
        Some(name) => name,
        None => file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .with_context(|| format!("cannot derive a collection name from {}", file.display()))?,
    };

    let collection = match import_collection(&ctx.fs, file, &name).await {
        Ok(collection) => collection,
        Err(ExchangeError::UnsupportedFileFormat(_)) => {
            ctx.failure("Unsupported file format")?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e.into()),
    };

    SaveToCollection::new(ctx.collections())
        .replace(&collection)
        .await?;
    ctx.success(&format!("Collection '{name}' saved successfully!"))?;
    Ok(ExitCode::SUCCESS)
}

/// Replays a collection and exits with failure if any request failed.
pub async fn run(ctx: &Context, name: &str) -> Result<ExitCode> {
    let Some(collection) = load(ctx, name).await? else {
        return Ok(ExitCode::SUCCESS);
    };
    ctx.print(style(format!("Running collection: {name}")).bold().to_string())?;
    ctx.print("")?;

    let env = ctx.environment().await?;
    let runner = RunCollection::new(
        Arc::new(ReqwestHttpClient::new()?),
        TestRunner::new(),
        ctx.history(),
    );

    let mut write_error = None;
    let summary = runner
        .execute(&collection, &env, |event| {
            for line in event_lines(&event) {
                if let Err(e) = ctx.print(line) {
                    write_error.get_or_insert(e);
                }
            }
        })
        .await;
    if let Some(e) = write_error {
        return Err(e);
    }

    ctx.print(
        style(format!(
            "Results: {}/{} passed, {} failed",
            summary.passed, summary.total, summary.failed
        ))
        .bold()
        .to_string(),
    )?;

    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn event_lines(event: &RunEvent<'_>) -> Vec<String> {
    match event {
        RunEvent::Started { index, total, .. } => {
            vec![style(format!("Request {index}/{total}")).cyan().bold().to_string()]
        }
        RunEvent::Completed {
            request,
            response,
            tests,
            ..
        } => {
            let mut lines = vec![render::run_line(request.method, &request.url, response.status)];
            lines.extend(render::assertion_lines(tests, "    "));
            lines.push(String::new());
            lines
        }
        RunEvent::Failed { error, .. } => {
            vec![style(format!("  Error: {error}")).red().to_string(), String::new()]
        }
    }
}
