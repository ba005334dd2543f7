//! The `mathcraft import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathcraft_core::store::SubmissionLog;

pub fn execute(
    access_code: String,
    log_flag: Option<PathBuf>,
    csv_path: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::require_teacher_access(&access_code, config_path.as_deref())?;
    let log_path = super::log_path(log_flag, &config);
    let mut log = SubmissionLog::load_or_default(&log_path)?;

    let bytes = std::fs::read(&csv_path)
        .with_context(|| format!("failed to read CSV from {}", csv_path.display()))?;
    let imported = mathcraft_core::export::import_csv(&bytes, &mut log)
        .with_context(|| format!("failed to import {}", csv_path.display()))?;

    log.save_json(&log_path)
        .with_context(|| format!("failed to save submissions to {}", log_path.display()))?;

    println!(
        "Imported {imported} submission(s) into {} ({} total)",
        log_path.display(),
        log.len()
    );
    Ok(())
}
