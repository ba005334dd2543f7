//! The `mathcraft export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathcraft_core::store::SubmissionLog;

pub fn execute(
    access_code: String,
    log_flag: Option<PathBuf>,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::require_teacher_access(&access_code, config_path.as_deref())?;
    let log = SubmissionLog::load_or_default(&super::log_path(log_flag, &config))?;

    let bytes = mathcraft_core::export::export_csv(&log)?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, bytes)
        .with_context(|| format!("failed to write CSV to {}", output.display()))?;

    println!(
        "Exported {} submission(s) to {}",
        log.len(),
        output.display()
    );
    Ok(())
}
