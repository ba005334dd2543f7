//! Class-wide statistics over the submission log.

use serde::{Deserialize, Serialize};

use crate::grading::{round_to, score};
use crate::model::{AnswerKey, DATE_FIELD, NAME_FIELD};
use crate::store::SubmissionLog;

/// Mean number of correct answers per submission.
///
/// An empty log yields 0.0 so that a dashboard with no submissions yet can
/// still render.
pub fn aggregate(log: &SubmissionLog, key: &AnswerKey) -> f64 {
    if log.is_empty() {
        return 0.0;
    }
    let total: usize = log.records().map(|r| score(r, key).correct).sum();
    total as f64 / log.len() as f64
}

/// Aggregate statistics across all submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of submissions graded.
    pub submissions: usize,
    /// Questions per submission.
    pub question_count: usize,
    /// Mean correct count.
    pub mean_correct: f64,
    /// Mean correct count as a percentage of `question_count`.
    pub mean_percentage: f64,
    /// Lowest correct count, 0 for an empty log.
    pub min_correct: usize,
    /// Highest correct count, 0 for an empty log.
    pub max_correct: usize,
    /// Per-question statistics in answer-key order.
    pub per_question: Vec<QuestionStats>,
    /// Per-respondent scores in submission order.
    pub per_submission: Vec<SubmissionScore>,
}

/// Statistics for a single question across all submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question: String,
    /// Submissions that answered correctly.
    pub correct: usize,
    /// Submissions that left the question unanswered.
    pub unanswered: usize,
    /// Fraction answered correctly, in `[0, 1]`. 0.0 for an empty log.
    pub correct_rate: f64,
}

/// One submission's score, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionScore {
    pub name: String,
    pub date: String,
    pub correct: usize,
    pub total: usize,
}

/// Compute aggregate statistics for the whole log.
///
/// `decimals` controls rounding of `mean_percentage` only.
pub fn compute_aggregate_stats(
    log: &SubmissionLog,
    key: &AnswerKey,
    decimals: u32,
) -> AggregateStats {
    let results: Vec<_> = log.records().map(|r| (r, score(r, key))).collect();
    let n = results.len();

    let per_question = key
        .question_ids()
        .map(|question| {
            let correct = results
                .iter()
                .filter(|(_, s)| s.is_correct(question))
                .count();
            let unanswered = results
                .iter()
                .filter(|(r, _)| !r.contains(question))
                .count();
            QuestionStats {
                question: question.to_string(),
                correct,
                unanswered,
                correct_rate: if n == 0 {
                    0.0
                } else {
                    correct as f64 / n as f64
                },
            }
        })
        .collect();

    let per_submission: Vec<SubmissionScore> = results
        .iter()
        .map(|(r, s)| SubmissionScore {
            name: r.get(NAME_FIELD).unwrap_or_default().to_string(),
            date: r.get(DATE_FIELD).unwrap_or_default().to_string(),
            correct: s.correct,
            total: s.total,
        })
        .collect();

    let mean_correct = aggregate(log, key);
    let mean_percentage = if key.is_empty() {
        0.0
    } else {
        round_to(mean_correct / key.len() as f64 * 100.0, decimals)
    };

    AggregateStats {
        submissions: n,
        question_count: key.len(),
        mean_correct,
        mean_percentage,
        min_correct: per_submission.iter().map(|s| s.correct).min().unwrap_or(0),
        max_correct: per_submission.iter().map(|s| s.correct).max().unwrap_or(0),
        per_question,
        per_submission,
    }
}

impl AggregateStats {
    /// The question with the lowest correct rate, if any submissions exist.
    ///
    /// Ties resolve to the earliest question in key order.
    pub fn hardest_question(&self) -> Option<&QuestionStats> {
        if self.submissions == 0 {
            return None;
        }
        self.per_question.iter().reduce(|hardest, q| {
            if q.correct_rate < hardest.correct_rate {
                q
            } else {
                hardest
            }
        })
    }
}
