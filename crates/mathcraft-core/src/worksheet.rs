//! The "Understanding Algebra Notation" worksheet.
//!
//! Defines the twelve multiple-choice questions, their allowed options and
//! correct answers, and the four reflection prompts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnswerKeyError;
use crate::model::{
    natural_cmp, schema_fields, AnswerKey, ResponseRecord, DATE_FIELD, NAME_FIELD,
};

/// Worksheet section a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Multiplication without the `·` symbol.
    Multiplication,
    /// Division using fraction notation.
    Division,
    /// Expressions mixing both.
    Combined,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Multiplication => write!(f, "multiplication"),
            Section::Division => write!(f, "division"),
            Section::Combined => write!(f, "combined"),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Field id, `Q1`..`Q12`.
    pub id: String,
    pub section: Section,
    pub prompt: String,
    /// Options offered to the respondent, in display order.
    pub options: Vec<String>,
    /// The correct option. Always one of `options`.
    pub answer: String,
}

/// A free-text reflection prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    /// Field id, `Analytical_1`..`Analytical_4`.
    pub id: String,
    pub prompt: String,
}

/// An advisory finding about a response record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: Option<String>,
    pub message: String,
}

/// The full worksheet definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub title: String,
    pub questions: Vec<Question>,
    pub reflections: Vec<Reflection>,
}

const QUESTIONS: &[(&str, Section, &str, [&str; 4], &str)] = &[
    (
        "Q1",
        Section::Multiplication,
        "What does 5x mean?",
        ["5 + x", "5 · x", "5 - x", "5 ÷ x"],
        "5 · x",
    ),
    (
        "Q2",
        Section::Multiplication,
        "What does 7y mean?",
        ["7 + y", "7 · y", "7 - y", "7 ÷ y"],
        "7 · y",
    ),
    (
        "Q3",
        Section::Multiplication,
        "If n = 6, what is 4n?",
        ["10", "24", "2", "1.5"],
        "24",
    ),
    (
        "Q4",
        Section::Multiplication,
        "Which means the same as 8 · m?",
        ["8 + m", "8m", "m + 8", "m - 8"],
        "8m",
    ),
    (
        "Q5",
        Section::Division,
        "What does n/8 mean?",
        ["n + 8", "n · 8", "n ÷ 8", "8 ÷ n"],
        "n ÷ 8",
    ),
    (
        "Q6",
        Section::Division,
        "If n = 24, what is n/6?",
        ["4", "18", "30", "144"],
        "4",
    ),
    (
        "Q7",
        Section::Division,
        "Which means the same as y ÷ 5?",
        ["5y", "y/5", "5/y", "y - 5"],
        "y/5",
    ),
    (
        "Q8",
        Section::Division,
        "A pizza is cut into 8 equal slices. What fraction of the pizza is one slice?",
        ["8", "1/8", "8/1", "1/4"],
        "1/8",
    ),
    (
        "Q9",
        Section::Combined,
        "What does 3x + 2 mean?",
        ["3 · x + 2", "3 + x + 2", "3 · (x + 2)", "32 · x"],
        "3 · x + 2",
    ),
    (
        "Q10",
        Section::Combined,
        "If x = 5, what is 2x + 1?",
        ["8", "11", "21", "26"],
        "11",
    ),
    (
        "Q11",
        Section::Combined,
        "What does 2n/4 mean?",
        ["(2 · n) ÷ 4", "2 + n ÷ 4", "2 ÷ (n · 4)", "24n"],
        "(2 · n) ÷ 4",
    ),
    (
        "Q12",
        Section::Combined,
        "If y = 8, what is y/2 + 3?",
        ["7", "1.6", "11", "4"],
        "7",
    ),
];

const REFLECTIONS: &[&str] = &[
    "In your own words, why can we write 3x instead of 3 · x?",
    "Explain what n/8 means using the pizza example.",
    "Why is it a problem to write 3 · x as 3x when x is a number like 4?",
    "Write a real-life situation that could be described by the expression 2n/4.",
];

impl Worksheet {
    /// The built-in algebra notation worksheet.
    pub fn standard() -> Self {
        let questions = QUESTIONS
            .iter()
            .map(|(id, section, prompt, options, answer)| Question {
                id: (*id).to_string(),
                section: *section,
                prompt: (*prompt).to_string(),
                options: options.iter().map(|o| (*o).to_string()).collect(),
                answer: (*answer).to_string(),
            })
            .collect();

        let reflections = REFLECTIONS
            .iter()
            .enumerate()
            .map(|(i, prompt)| Reflection {
                id: format!("Analytical_{}", i + 1),
                prompt: (*prompt).to_string(),
            })
            .collect();

        Self {
            title: "Understanding Algebra Notation".to_string(),
            questions,
            reflections,
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions belonging to one section, in worksheet order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.section == section)
    }

    /// The answer key derived from this worksheet's questions.
    pub fn answer_key(&self) -> Result<AnswerKey, AnswerKeyError> {
        AnswerKey::new(
            self.questions
                .iter()
                .map(|q| (q.id.clone(), q.answer.clone())),
        )
    }

    /// Field ids in schema order: identity, reflections, questions.
    pub fn field_ids(&self) -> Vec<String> {
        schema_fields()
    }

    /// Check a record against the worksheet without rejecting anything.
    ///
    /// Reports missing identity, unknown field ids and values that are not
    /// one of a question's options.
    pub fn validate_record(&self, record: &ResponseRecord) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for field in [NAME_FIELD, DATE_FIELD] {
            if record.get(field).map_or(true, |v| v.trim().is_empty()) {
                warnings.push(ValidationWarning {
                    field: Some(field.to_string()),
                    message: format!("{field} is required to submit"),
                });
            }
        }

        let known = self.field_ids();
        let mut unknown: Vec<&str> = record
            .field_ids()
            .filter(|id| !known.iter().any(|k| k == id))
            .collect();
        unknown.sort_by(|a, b| natural_cmp(a, b));
        for id in unknown {
            warnings.push(ValidationWarning {
                field: Some(id.to_string()),
                message: format!("'{id}' is not a field of this worksheet"),
            });
        }

        for q in &self.questions {
            match record.get(&q.id) {
                None => warnings.push(ValidationWarning {
                    field: Some(q.id.clone()),
                    message: format!("{} is unanswered", q.id),
                }),
                Some(value) if !q.options.iter().any(|o| o == value) => {
                    warnings.push(ValidationWarning {
                        field: Some(q.id.clone()),
                        message: format!("'{value}' is not one of the options for {}", q.id),
                    })
                }
                Some(_) => {}
            }
        }

        warnings
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::standard()
    }
}
