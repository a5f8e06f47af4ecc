use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::render::{self, HISTORY_ROWS};

pub async fn show(ctx: &Context) -> Result<ExitCode> {
    match ctx.history().load().await? {
        Some(history) if !history.is_empty() => {
            ctx.print(render::history(history.recent(HISTORY_ROWS)))?;
        }
        _ => ctx.warn("No history found")?,
    }
    Ok(ExitCode::SUCCESS)
}
