//! TOML response file parser.
//!
//! A responses file is what the presentation layer hands us for one
//! respondent: identity, reflection answers and question answers.
//!
//! ```toml
//! [student]
//! name = "Ana"
//! date = "2024-01-01"
//!
//! [reflections]
//! Analytical_1 = "..."
//!
//! [answers]
//! Q1 = "5 · x"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{ResponseRecord, DATE_FIELD, NAME_FIELD};

/// Intermediate TOML structure for parsing responses files.
#[derive(Debug, Deserialize)]
struct TomlResponsesFile {
    #[serde(default)]
    student: TomlStudent,
    #[serde(default)]
    reflections: BTreeMap<String, String>,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlStudent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

/// Parse a single TOML responses file.
pub fn parse_responses(path: &Path) -> Result<ResponseRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;

    parse_responses_str(&content, path)
}

/// Parse a TOML string into a `ResponseRecord` (useful for testing).
///
/// Fields are applied in file order: identity, reflections, answers. Values
/// are not checked against the worksheet here.
pub fn parse_responses_str(content: &str, source_path: &Path) -> Result<ResponseRecord> {
    let parsed: TomlResponsesFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut record = ResponseRecord::new();
    if let Some(name) = parsed.student.name {
        record.set(NAME_FIELD, name);
    }
    if let Some(date) = parsed.student.date {
        record.set(DATE_FIELD, date);
    }
    for (field, value) in parsed.reflections.into_iter().chain(parsed.answers) {
        record.set(field, value);
    }

    Ok(record)
}

/// Responses files found under one path.
#[derive(Debug, Default)]
pub struct LoadedResponses {
    /// Parsed files, sorted by path.
    pub records: Vec<(PathBuf, ResponseRecord)>,
    /// Files in a directory that could not be read or parsed.
    pub skipped: Vec<(PathBuf, anyhow::Error)>,
}

impl LoadedResponses {
    /// Number of files seen, parsed or not.
    pub fn file_count(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Load every `.toml` responses file in a directory, sorted by file name.
///
/// A broken file does not stop the others from loading; it is reported in
/// [`LoadedResponses::skipped`].
pub fn load_responses_directory(dir: &Path) -> Result<LoadedResponses> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut loaded = LoadedResponses::default();
    for path in paths {
        match parse_responses(&path) {
            Ok(record) => loaded.records.push((path, record)),
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
                loaded.skipped.push((path, e));
            }
        }
    }

    Ok(loaded)
}

/// Load a single file, or every file in a directory.
///
/// A single file that fails to parse is an error, not a skip.
pub fn load_responses(path: &Path) -> Result<LoadedResponses> {
    if path.is_dir() {
        load_responses_directory(path)
    } else {
        Ok(LoadedResponses {
            records: vec![(path.to_path_buf(), parse_responses(path)?)],
            skipped: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[student]
name = "Ana"
date = "2024-01-01"

[reflections]
Analytical_1 = "3x is three groups of x"

[answers]
Q1 = "5 · x"
Q2 = "7 + y"
Q10 = "11"
"#;

    #[test]
    fn parse_valid_toml() {
        let record = parse_responses_str(SAMPLE, Path::new("test.toml")).unwrap();
        assert_eq!(record.get("Name"), Some("Ana"));
        assert_eq!(record.get("Date"), Some("2024-01-01"));
        assert_eq!(record.get("Analytical_1"), Some("3x is three groups of x"));
        assert_eq!(record.get("Q1"), Some("5 · x"));
        assert_eq!(record.get("Q10"), Some("11"));
        assert_eq!(record.len(), 6);
    }

    #[test]
    fn parse_missing_sections() {
        let record = parse_responses_str("[answers]\nQ3 = \"24\"\n", Path::new("t.toml")).unwrap();
        assert_eq!(record.len(), 1);
        assert!(!record.has_identity());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_responses_str("[answers\nQ1 = ", Path::new("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_non_string_answers() {
        let result = parse_responses_str("[answers]\nQ3 = 24\n", Path::new("t.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), SAMPLE).unwrap();
        std::fs::write(
            dir.path().join("a.toml"),
            "[student]\nname = \"Ben\"\ndate = \"2024-01-02\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[[[").unwrap();

        let loaded = load_responses(dir.path()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].1.get("Name"), Some("Ben"));
        assert_eq!(loaded.records[1].1.get("Name"), Some("Ana"));

        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].0.ends_with("broken.toml"));
        assert_eq!(loaded.file_count(), 3);
    }

    #[test]
    fn load_single_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[[").unwrap();
        assert!(load_responses(&path).is_err());
    }
}
