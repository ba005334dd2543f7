//! mathcraft configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::AnswerKey;
use crate::worksheet::Worksheet;

/// Top-level mathcraft configuration.
///
/// Note: Custom Debug impl masks the access code so it never lands in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct MathcraftConfig {
    /// Code the teacher enters to reach the dashboard and export.
    ///
    /// Compared by plain string equality. This keeps students out of the
    /// class view during a lesson; it is not authentication.
    #[serde(default)]
    pub teacher_access_code: Option<String>,
    /// Where the submission log is persisted.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Decimal places for displayed percentages.
    #[serde(default)]
    pub percentage_decimals: u32,
    /// Replacement answer key. Must cover exactly Q1..Q12 when present.
    #[serde(default)]
    pub answer_key: Option<BTreeMap<String, String>>,
}

impl std::fmt::Debug for MathcraftConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MathcraftConfig")
            .field(
                "teacher_access_code",
                &self.teacher_access_code.as_ref().map(|_| "***"),
            )
            .field("log_path", &self.log_path)
            .field("percentage_decimals", &self.percentage_decimals)
            .field("answer_key", &self.answer_key)
            .finish()
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("./mathcraft-submissions.json")
}

impl Default for MathcraftConfig {
    fn default() -> Self {
        Self {
            teacher_access_code: None,
            log_path: default_log_path(),
            percentage_decimals: 0,
            answer_key: None,
        }
    }
}

impl MathcraftConfig {
    /// The answer key in effect: the configured one, or the worksheet's.
    pub fn answer_key(&self) -> Result<AnswerKey> {
        match &self.answer_key {
            Some(answers) => AnswerKey::worksheet(answers.clone())
                .context("invalid [answer_key] in configuration"),
            None => Ok(Worksheet::standard().answer_key()?),
        }
    }

    /// Whether `code` unlocks the teacher views.
    ///
    /// No configured code means the views stay locked.
    pub fn access_granted(&self, code: &str) -> bool {
        self.teacher_access_code
            .as_deref()
            .is_some_and(|expected| !expected.is_empty() && expected == code)
    }
}

/// Environment variable that overrides `teacher_access_code`.
pub const ACCESS_CODE_ENV: &str = "MATHCRAFT_ACCESS_CODE";

/// Expand `${NAME}` references from the environment.
///
/// Unset variables expand to nothing. An unterminated `${` is kept as is.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find("${") {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 2..open + close];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Load configuration from `path`, or from the first default location found.
///
/// An explicit `path` must exist. Otherwise `./mathcraft.toml` is tried,
/// then `~/.config/mathcraft/config.toml`, then built-in defaults.
/// [`ACCESS_CODE_ENV`] overrides the access code either way.
pub fn load_config_from(path: Option<&Path>) -> Result<MathcraftConfig> {
    let found = match path {
        Some(p) if !p.exists() => anyhow::bail!("config file not found: {}", p.display()),
        Some(p) => Some(p.to_path_buf()),
        None => candidate_paths().into_iter().find(|p| p.exists()),
    };

    let mut config = match found {
        Some(file) => {
            tracing::debug!(path = %file.display(), "loading config");
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            parse_config_str(&text).with_context(|| format!("invalid config {}", file.display()))?
        }
        None => {
            tracing::debug!("no config file, using defaults");
            MathcraftConfig::default()
        }
    };

    if let Ok(code) = std::env::var(ACCESS_CODE_ENV) {
        config.teacher_access_code = Some(code);
    }
    Ok(config)
}

const KNOWN_KEYS: &[&str] = &[
    "teacher_access_code",
    "log_path",
    "percentage_decimals",
    "answer_key",
];

/// Parse config TOML, expanding `${VAR}` in the access code.
///
/// Unknown top-level keys are ignored with a warning.
pub fn parse_config_str(content: &str) -> Result<MathcraftConfig> {
    let table: toml::Table = toml::from_str(content)?;
    for key in unknown_keys(&table) {
        tracing::warn!(key, "ignoring unknown config key");
    }

    let mut config: MathcraftConfig = toml::Value::Table(table).try_into()?;
    if let Some(code) = config.teacher_access_code.as_mut() {
        *code = resolve_env_vars(code);
    }
    Ok(config)
}

fn unknown_keys(table: &toml::Table) -> Vec<&str> {
    table
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_KEYS.contains(key))
        .collect()
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("mathcraft.toml")];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("mathcraft")
                .join("config.toml"),
        );
    }
    paths
}
