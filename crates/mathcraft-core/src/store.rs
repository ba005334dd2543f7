//! The current attempt and the append-only submission log.
//!
//! A [`ResponseStore`] is one respondent session: it owns the record being
//! filled in and the log that finalized copies are appended to. Nothing is
//! global; callers construct one store per session and drop it when the
//! session ends.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SubmitError;
use crate::grading::{score, ScoreResult};
use crate::model::{AnswerKey, ResponseRecord};

/// A finalized, immutable copy of a respondent's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub record: ResponseRecord,
}

/// Ordered, append-only collection of submissions.
///
/// There is no way to remove or edit an entry once it is appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionLog {
    entries: Vec<Submission>,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Submissions in submission order.
    pub fn submissions(&self) -> &[Submission] {
        &self.entries
    }

    /// Records in submission order.
    pub fn records(&self) -> impl Iterator<Item = &ResponseRecord> {
        self.entries.iter().map(|s| &s.record)
    }

    pub(crate) fn push(&mut self, record: ResponseRecord) -> &Submission {
        let index = self.entries.len();
        self.entries.push(Submission {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            record,
        });
        &self.entries[index]
    }

    /// Save the log as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("failed to serialize submission log")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write submission log to {}", path.display()))?;
        Ok(())
    }

    /// Load a log saved with [`save_json`](Self::save_json).
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submission log from {}", path.display()))?;
        let log: SubmissionLog =
            serde_json::from_str(&content).context("failed to parse submission log JSON")?;
        Ok(log)
    }

    /// Load a log if the file exists, or start a new one.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            tracing::debug!("no submission log at {}, starting empty", path.display());
            Ok(Self::default())
        }
    }
}

/// Append a deep copy of `record` to `log` if both identity fields are set.
///
/// On failure the log is left untouched.
pub fn try_submit(record: &ResponseRecord, log: &mut SubmissionLog) -> Result<(), SubmitError> {
    if !record.has_identity() {
        tracing::warn!("submission rejected: name or date missing");
        return Err(SubmitError::MissingIdentityFields);
    }
    let submission = log.push(record.clone());
    tracing::info!(id = %submission.id, "submission recorded");
    Ok(())
}

/// One respondent session: the attempt in progress plus the log.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    current: ResponseRecord,
    log: SubmissionLog,
}

impl ResponseStore {
    /// Start a session with an empty attempt and an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session that appends to an existing log.
    pub fn with_log(log: SubmissionLog) -> Self {
        Self {
            current: ResponseRecord::new(),
            log,
        }
    }

    /// Set `field` to `value` on the current attempt, overwriting.
    pub fn update(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.current.set(field, value);
    }

    pub fn current(&self) -> &ResponseRecord {
        &self.current
    }

    pub fn log(&self) -> &SubmissionLog {
        &self.log
    }

    /// Grade the current attempt.
    pub fn score(&self, key: &AnswerKey) -> ScoreResult {
        score(&self.current, key)
    }

    /// Finalize the current attempt into the log.
    ///
    /// The current attempt stays as it is either way, so the respondent can
    /// fix missing identity fields and try again.
    pub fn try_submit(&mut self) -> Result<(), SubmitError> {
        try_submit(&self.current, &mut self.log)
    }

    /// End the session, handing back the log.
    pub fn into_log(self) -> SubmissionLog {
        self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, date: &str) -> ResponseRecord {
        [("Name", name), ("Date", date), ("Q1", "5 · x")]
            .into_iter()
            .collect()
    }

    #[test]
    fn submit_without_name_is_rejected() {
        let mut log = SubmissionLog::new();
        let result = try_submit(&filled("", "2024-01-01"), &mut log);
        assert_eq!(result, Err(SubmitError::MissingIdentityFields));
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn submit_without_date_is_rejected() {
        let mut log = SubmissionLog::new();
        let result = try_submit(&filled("Ana", ""), &mut log);
        assert_eq!(result, Err(SubmitError::MissingIdentityFields));
        assert!(log.is_empty());
    }

    #[test]
    fn whitespace_identity_is_rejected() {
        let mut log = SubmissionLog::new();
        assert!(try_submit(&filled("  ", "\t"), &mut log).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn submit_appends_deep_copy() {
        let mut log = SubmissionLog::new();
        let mut record = filled("Ana", "2024-01-01");
        try_submit(&record, &mut log).unwrap();
        assert_eq!(log.len(), 1);

        record.set("Q1", "5 + x");
        record.set("Name", "Someone else");
        let stored = &log.submissions()[0].record;
        assert_eq!(stored.get("Q1"), Some("5 · x"));
        assert_eq!(stored.get("Name"), Some("Ana"));
    }

    #[test]
    fn log_preserves_submission_order() {
        let mut log = SubmissionLog::new();
        for name in ["Ana", "Ben", "Cleo"] {
            try_submit(&filled(name, "2024-01-01"), &mut log).unwrap();
        }
        let names: Vec<&str> = log.records().filter_map(|r| r.get("Name")).collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cleo"]);
    }

    #[test]
    fn store_session_flow() {
        let key = AnswerKey::new([("Q1", "5 · x"), ("Q2", "7 · y")]).unwrap();
        let mut store = ResponseStore::new();
        store.update("Q1", "5 · x");
        store.update("Q2", "7 + y");
        assert_eq!(store.score(&key).correct, 1);

        assert_eq!(store.try_submit(), Err(SubmitError::MissingIdentityFields));
        assert!(store.log().is_empty());

        store.update("Name", "Ana");
        store.update("Date", "2024-01-01");
        store.update("Q2", "7 · y");
        assert_eq!(store.try_submit(), Ok(()));
        assert_eq!(store.log().len(), 1);

        // Later edits do not reach the stored copy.
        store.update("Q1", "nonsense");
        assert_eq!(store.log().submissions()[0].record.get("Q1"), Some("5 · x"));
        assert_eq!(store.current().get("Q1"), Some("nonsense"));

        let log = store.into_log();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn update_accepts_any_value() {
        let mut store = ResponseStore::new();
        store.update("Q3", "not an option");
        store.update("Mystery", "value");
        assert_eq!(store.current().get("Q3"), Some("not an option"));
        assert_eq!(store.current().get("Mystery"), Some("value"));
    }

    #[test]
    fn json_roundtrip() {
        let mut log = SubmissionLog::new();
        try_submit(&filled("Ana", "2024-01-01"), &mut log).unwrap();
        try_submit(&filled("Ben", "2024-01-02"), &mut log).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.json");
        log.save_json(&path).unwrap();
        let loaded = SubmissionLog::load_json(&path).unwrap();
        assert_eq!(loaded, log);
    }

    #[test]
    fn load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = SubmissionLog::load_or_default(&dir.path().join("none.json")).unwrap();
        assert!(log.is_empty());
    }
}
