//! The `mathcraft submit` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathcraft_core::grading::score;
use mathcraft_core::store::{try_submit, SubmissionLog};

pub fn execute(
    responses_path: PathBuf,
    log_flag: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = mathcraft_core::config::load_config_from(config_path.as_deref())?;
    let key = config.answer_key()?;
    let log_path = super::log_path(log_flag, &config);

    let loaded = mathcraft_core::parser::load_responses(&responses_path)?;
    if loaded.file_count() == 0 {
        anyhow::bail!("no responses files found in {}", responses_path.display());
    }

    for (path, e) in &loaded.skipped {
        eprintln!("Rejected {}: {e:#}", path.display());
    }
    let mut rejected = loaded.skipped.len();

    let mut log = SubmissionLog::load_or_default(&log_path)?;
    let before = log.len();

    for (path, record) in &loaded.records {
        match try_submit(record, &mut log) {
            Ok(()) => {
                let result = score(record, &key);
                println!(
                    "Submitted {}: {}/{} ({}%)",
                    path.display(),
                    result.correct,
                    result.total,
                    result.percentage(config.percentage_decimals)
                );
            }
            Err(e) => {
                eprintln!("Rejected {}: {e}", path.display());
                rejected += 1;
            }
        }
    }

    if log.len() > before {
        log.save_json(&log_path)
            .with_context(|| format!("failed to save submissions to {}", log_path.display()))?;
        println!("{} submission(s) in {}", log.len(), log_path.display());
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} submission(s) rejected");
    }

    Ok(())
}
