//! Scoring a single attempt against an answer key.
//!
//! Comparison is exact string equality: no trimming, no case folding, no
//! Unicode normalization. An absent answer is simply incorrect.

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::{AnswerKey, ResponseRecord};

/// Correctness of one question in an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question: String,
    /// The respondent's answer, if any.
    pub given: Option<String>,
    pub expected: String,
    pub correct: bool,
}

/// The graded result of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Number of questions answered correctly.
    pub correct: usize,
    /// Number of questions in the key.
    pub total: usize,
    /// Per-question outcomes in answer-key order.
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreResult {
    /// Whether `question` was answered correctly. Unknown ids are `false`.
    pub fn is_correct(&self, question: &str) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.question == question && o.correct)
    }

    /// Ids of the questions answered correctly.
    pub fn matches(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.correct)
            .map(|o| o.question.as_str())
            .collect()
    }

    /// Ids of the questions answered incorrectly or left unanswered.
    pub fn mismatches(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.correct)
            .map(|o| o.question.as_str())
            .collect()
    }

    /// Percentage of correct answers, rounded to `decimals` places.
    ///
    /// An empty key yields 0.0 rather than an error.
    pub fn percentage(&self, decimals: u32) -> f64 {
        percentage(self.correct, self.total, decimals).unwrap_or(0.0)
    }
}

/// Grade `responses` against `key`.
///
/// Only the questions in `key` are graded; any other fields in `responses`
/// (identity, reflections, unknown ids) are ignored.
pub fn score(responses: &ResponseRecord, key: &AnswerKey) -> ScoreResult {
    let outcomes: Vec<QuestionOutcome> = key
        .iter()
        .map(|(question, expected)| {
            let given = responses.get(question);
            QuestionOutcome {
                question: question.to_string(),
                given: given.map(str::to_string),
                expected: expected.to_string(),
                correct: given == Some(expected),
            }
        })
        .collect();

    let correct = outcomes.iter().filter(|o| o.correct).count();
    tracing::debug!(correct, total = outcomes.len(), "scored response record");

    ScoreResult {
        correct,
        total: outcomes.len(),
        outcomes,
    }
}

/// `count / total * 100`, rounded half away from zero to `decimals` places.
pub fn percentage(count: usize, total: usize, decimals: u32) -> Result<f64, GradingError> {
    if total == 0 {
        return Err(GradingError::DivisionByZero);
    }
    let raw = count as f64 / total as f64 * 100.0;
    Ok(round_to(raw, decimals))
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::Worksheet;

    fn small_key() -> AnswerKey {
        AnswerKey::new([
            ("Q1", "5 × x"),
            ("Q2", "7 × y"),
            ("Q3", "24"),
            ("Q4", "8m"),
        ])
        .unwrap()
    }

    #[test]
    fn three_of_four() {
        let record: ResponseRecord = [
            ("Q1", "5 × x"),
            ("Q2", "wrong"),
            ("Q3", "24"),
            ("Q4", "8m"),
        ]
        .into_iter()
        .collect();

        let result = score(&record, &small_key());
        assert_eq!(result.correct, 3);
        assert_eq!(result.total, 4);
        assert_eq!(result.mismatches(), vec!["Q2"]);
        assert_eq!(result.matches(), vec!["Q1", "Q3", "Q4"]);
        assert!(!result.is_correct("Q2"));
        assert!(result.is_correct("Q3"));
    }

    #[test]
    fn absent_answers_are_incorrect() {
        let result = score(&ResponseRecord::new(), &small_key());
        assert_eq!(result.correct, 0);
        assert_eq!(result.mismatches().len(), 4);
        assert!(result.outcomes.iter().all(|o| o.given.is_none()));
    }

    #[test]
    fn comparison_is_exact() {
        let key = small_key();
        let record: ResponseRecord = [("Q3", " 24"), ("Q4", "8M"), ("Q1", "5 × x ")]
            .into_iter()
            .collect();
        assert_eq!(score(&record, &key).correct, 0);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let record: ResponseRecord = [("Name", "Ana"), ("Q3", "24"), ("Q99", "24")]
            .into_iter()
            .collect();
        let result = score(&record, &small_key());
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn order_of_updates_does_not_matter() {
        let key = Worksheet::standard().answer_key().unwrap();
        let pairs = [("Q1", "5 · x"), ("Q5", "n ÷ 8"), ("Q10", "8"), ("Q12", "7")];

        let mut forward = ResponseRecord::new();
        for (k, v) in pairs {
            forward.set(k, v);
        }
        let mut backward = ResponseRecord::new();
        for (k, v) in pairs.iter().rev() {
            backward.set(*k, *v);
        }
        // Overwrite then restore: only the final mapping counts.
        backward.set("Q1", "5 + x");
        backward.set("Q1", "5 · x");

        assert_eq!(score(&forward, &key), score(&backward, &key));
        assert_eq!(score(&forward, &key).correct, 3);
    }

    #[test]
    fn perfect_worksheet_score() {
        let ws = Worksheet::standard();
        let key = ws.answer_key().unwrap();
        let record: ResponseRecord = ws
            .questions
            .iter()
            .map(|q| (q.id.clone(), q.answer.clone()))
            .collect();
        let result = score(&record, &key);
        assert_eq!(result.correct, 12);
        assert!(result.mismatches().is_empty());
        assert_eq!(result.percentage(0), 100.0);
    }

    #[test]
    fn percentage_rounding() {
        assert_eq!(percentage(9, 12, 0), Ok(75.0));
        assert_eq!(percentage(1, 3, 0), Ok(33.0));
        assert_eq!(percentage(2, 3, 0), Ok(67.0));
        assert_eq!(percentage(1, 3, 1), Ok(33.3));
        assert_eq!(percentage(0, 12, 0), Ok(0.0));
    }

    #[test]
    fn percentage_of_zero_total() {
        assert_eq!(percentage(0, 0, 0), Err(GradingError::DivisionByZero));
        assert_eq!(percentage(3, 0, 2), Err(GradingError::DivisionByZero));
    }
}
