//! Command dispatch and handlers.

pub mod backup;
pub mod chart;
pub mod day;
pub mod tasks;

use std::future::Future;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler against the live context.
///
/// # Errors
///
/// Returns an error string if settings cannot be loaded, the data directory
/// cannot be opened, or the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::load().map_err(|e| e.to_string())?;
    let ctx = ServiceContext::live(&settings).map_err(|e| e.to_string())?;
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    block_on(async {
        match command {
            Command::Today { date } => day::today(ctx, *date).await,
            Command::Tap { id, date } => day::tap(ctx, *id, *date).await,
            Command::Set { id, minutes, date } => day::set(ctx, *id, *minutes, *date).await,
            Command::ResetDay { date } => day::reset(ctx, *date).await,
            Command::Add(fields) => tasks::add(ctx, fields).await,
            Command::Edit { id, fields } => tasks::edit(ctx, *id, fields).await,
            Command::Remove { id } => tasks::remove(ctx, *id).await,
            Command::List => tasks::list(ctx).await,
            Command::Chart { task } => chart::run(ctx, *task).await,
            Command::Backup => backup::run(ctx).await,
        }
    })?
}

fn block_on<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    Ok(runtime.block_on(future))
}
