//! Class report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AnswerKey;
use crate::statistics::{compute_aggregate_stats, AggregateStats};
use crate::store::SubmissionLog;

/// A snapshot of the class dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Worksheet title shown in headers.
    pub title: String,
    /// Aggregate statistics.
    pub stats: AggregateStats,
}

impl ClassReport {
    /// Build a report for the current state of the log.
    pub fn build(
        title: impl Into<String>,
        log: &SubmissionLog,
        key: &AnswerKey,
        decimals: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.into(),
            stats: compute_aggregate_stats(log, key, decimals),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let stats = &self.stats;
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.title));
        md.push_str(&format!(
            "**Summary:** {} submissions, mean {:.1}/{} ({}%)\n\n",
            stats.submissions, stats.mean_correct, stats.question_count, stats.mean_percentage
        ));

        if stats.submissions == 0 {
            md.push_str("_No submissions yet._\n");
            return md;
        }

        md.push_str("### Students\n\n");
        md.push_str("| Name | Date | Score |\n");
        md.push_str("|------|------|-------|\n");
        for s in &stats.per_submission {
            md.push_str(&format!(
                "| {} | {} | {}/{} |\n",
                escape_cell(&s.name),
                escape_cell(&s.date),
                s.correct,
                s.total
            ));
        }
        md.push('\n');

        md.push_str("### Questions\n\n");
        md.push_str("| Question | Correct | Unanswered | Rate |\n");
        md.push_str("|----------|---------|------------|------|\n");
        for q in &stats.per_question {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                q.question,
                q.correct,
                q.unanswered,
                q.correct_rate * 100.0
            ));
        }

        if let Some(hardest) = stats.hardest_question() {
            md.push_str(&format!(
                "\nHardest question: **{}** ({:.1}% correct)\n",
                hardest.question,
                hardest.correct_rate * 100.0
            ));
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseRecord;
    use crate::store::try_submit;
    use crate::worksheet::Worksheet;

    fn make_report(names: &[&str]) -> ClassReport {
        let ws = Worksheet::standard();
        let mut log = SubmissionLog::new();
        for name in names {
            let record: ResponseRecord = [
                ("Name", *name),
                ("Date", "2024-01-01"),
                ("Q1", "5 · x"),
                ("Q2", "7 + y"),
            ]
            .into_iter()
            .collect();
            try_submit(&record, &mut log).unwrap();
        }
        ClassReport::build(ws.title.clone(), &log, &ws.answer_key().unwrap(), 0)
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(&["Ana"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded: ClassReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.stats, report.stats);
    }

    #[test]
    fn markdown_output() {
        let md = make_report(&["Ana", "B|en"]).to_markdown();
        assert!(md.contains("Understanding Algebra Notation"));
        assert!(md.contains("2 submissions"));
        assert!(md.contains("| Ana | 2024-01-01 | 1/12 |"));
        assert!(md.contains("B\\|en"));
        assert!(md.contains("| Q1 | 2 | 0 | 100.0% |"));
        assert!(md.contains("Hardest question: **Q2**"));
    }

    #[test]
    fn markdown_for_empty_class() {
        let md = make_report(&[]).to_markdown();
        assert!(md.contains("0 submissions"));
        assert!(md.contains("No submissions yet"));
    }
}
