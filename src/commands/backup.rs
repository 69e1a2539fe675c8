//! `dailystuff backup` command.

use crate::backup::BackupOutcome;
use crate::config::DRIVE_FOLDER_VAR;
use crate::context::ServiceContext;

/// Execute the `backup` command.
///
/// Runs the same once-a-day backup that `today` triggers, but reports the
/// outcome and fails when the upload fails.
///
/// # Errors
///
/// Returns an error string if no remote folder is configured or the backup
/// fails.
pub async fn run(ctx: &ServiceContext) -> Result<(), String> {
    let backup = ctx
        .backup()
        .ok_or_else(|| format!("Backups are not configured; set {DRIVE_FOLDER_VAR}"))?;
    match backup.run_if_due().await {
        BackupOutcome::Skipped => println!("Backup already attempted today; next attempt tomorrow."),
        BackupOutcome::Completed(file) => println!("Uploaded {} ({})", file.name, file.id),
        BackupOutcome::Failed(reason) => return Err(format!("Backup failed: {reason}")),
    }
    Ok(())
}
