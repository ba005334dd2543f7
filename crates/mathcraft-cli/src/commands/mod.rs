pub mod dashboard;
pub mod export;
pub mod import;
pub mod init;
pub mod pizza;
pub mod score;
pub mod submit;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use mathcraft_core::config::MathcraftConfig;

/// Load config and refuse to continue unless `access_code` matches it.
pub(crate) fn require_teacher_access(
    access_code: &str,
    config_path: Option<&Path>,
) -> Result<MathcraftConfig> {
    let config = mathcraft_core::config::load_config_from(config_path)?;
    if !config.access_granted(access_code) {
        tracing::warn!("teacher view requested with a wrong access code");
        anyhow::bail!("access denied: wrong or unset teacher access code");
    }
    Ok(config)
}

/// The log path in effect: `--log` wins over `log_path` from config.
pub(crate) fn log_path(flag: Option<PathBuf>, config: &MathcraftConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.log_path.clone())
}
