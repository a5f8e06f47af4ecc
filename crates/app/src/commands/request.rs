use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use apitester_application::ports::{AssertionEvaluator, FileSystem};
use apitester_application::{ExecuteRequest, SaveToCollection};
use apitester_domain::request::parse_pair;
use apitester_domain::{BasicAuth, RequestSpec, SavedRequest};
use apitester_infrastructure::{ReqwestHttpClient, TestRunner};
use console::style;
use serde_json::Value;
use tracing::warn;

use super::Context;
use crate::cli::RequestArgs;
use crate::render;

/// Sends one request, renders the response, evaluates `--test` assertions,
/// then records history and optionally saves the request.
pub async fn send(ctx: &Context, args: RequestArgs) -> Result<ExitCode> {
    let spec = build_spec(&ctx.fs, &args).await?;
    let env = ctx.environment().await?;

    ctx.print(
        style(format!("→ {} {}", spec.method, spec.url))
            .blue()
            .bold()
            .to_string(),
    )?;
    ctx.print("")?;

    let client = Arc::new(ReqwestHttpClient::new()?);
    let output = ExecuteRequest::new(client).execute(&spec, &env).await?;
    let response = output.response;
    ctx.print(render::response(&response, args.show_headers))?;

    let mut exit = ExitCode::SUCCESS;
    if !args.tests.is_empty() {
        let results = TestRunner::new().evaluate(&response, &args.tests);
        ctx.print("")?;
        ctx.print(render::test_results(&results))?;
        if !results.all_passed() {
            exit = ExitCode::FAILURE;
        }
    }

    if let Err(e) = ctx.history().record(spec.method, &spec.url, &response).await {
        warn!(error = %e, "failed to record history");
    }

    if let Some(collection) = &args.save {
        SaveToCollection::new(ctx.collections())
            .execute(collection, SavedRequest::from_spec(&spec, args.tests.clone()))
            .await?;
        ctx.success(&format!("Collection '{collection}' saved successfully!"))?;
    }

    Ok(exit)
}

/// Builds the unsubstituted request from the command-line options.
///
/// Malformed `-H`, `-p` and `--auth` values are skipped.
async fn build_spec<F: FileSystem>(fs: &F, args: &RequestArgs) -> Result<RequestSpec> {
    let mut spec = RequestSpec::new(args.method, args.url.clone())
        .with_timeout(args.timeout)
        .with_verify_tls(!args.no_verify);

    for (name, value) in args.headers.iter().filter_map(|h| parse_pair(h, ':').ok()) {
        spec = spec.with_header(name, value);
    }
    for (name, value) in args.params.iter().filter_map(|p| parse_pair(p, '=').ok()) {
        spec = spec.with_param(name, value);
    }
    if let Some(auth) = args.auth.as_deref().and_then(BasicAuth::parse) {
        spec = spec.with_auth(auth);
    }
    if let Some(body) = read_body(fs, args).await? {
        spec = spec.with_body(body);
    }
    Ok(spec)
}

/// `-f` wins over `-d`. A `-d` value naming an existing file is read from disk.
async fn read_body<F: FileSystem>(fs: &F, args: &RequestArgs) -> Result<Option<Value>> {
    if let Some(path) = &args.file {
        return read_body_file(fs, path).await.map(Some);
    }
    let Some(body) = &args.body else {
        return Ok(None);
    };
    let path = Path::new(body);
    if fs.is_file(path).await {
        return read_body_file(fs, path).await.map(Some);
    }
    Ok(Some(RequestSpec::parse_body(body)))
}

async fn read_body_file<F: FileSystem>(fs: &F, path: &Path) -> Result<Value> {
    let content = fs
        .read_file_string(path)
        .await
        .with_context(|| format!("could not read body from {}", path.display()))?;
    Ok(RequestSpec::parse_body(&content))
}
