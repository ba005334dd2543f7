//! Core data model types for mathcraft.
//!
//! A worksheet attempt is a flat [`ResponseRecord`] keyed by field id, graded
//! against an immutable [`AnswerKey`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AnswerKeyError;

/// Identity field holding the respondent's name.
pub const NAME_FIELD: &str = "Name";
/// Identity field holding the attempt date.
pub const DATE_FIELD: &str = "Date";
/// Number of multiple-choice questions on the worksheet.
pub const QUESTION_COUNT: usize = 12;
/// Number of free-text reflection prompts on the worksheet.
pub const REFLECTION_COUNT: usize = 4;

/// Question ids `Q1`..`Q12` in worksheet order.
pub fn question_ids() -> Vec<String> {
    (1..=QUESTION_COUNT).map(|i| format!("Q{i}")).collect()
}

/// Reflection ids `Analytical_1`..`Analytical_4` in worksheet order.
pub fn reflection_ids() -> Vec<String> {
    (1..=REFLECTION_COUNT)
        .map(|i| format!("Analytical_{i}"))
        .collect()
}

/// The fixed record schema: identity, reflections, then questions.
pub fn schema_fields() -> Vec<String> {
    let mut fields = vec![NAME_FIELD.to_string(), DATE_FIELD.to_string()];
    fields.extend(reflection_ids());
    fields.extend(question_ids());
    fields
}

/// Compare field ids so that `Q2` sorts before `Q10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn split(s: &str) -> (&str, Option<u64>) {
        let digits = s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (prefix, number) = s.split_at(s.len() - digits);
        (prefix, number.parse().ok())
    }

    let (pa, na) = split(a);
    let (pb, nb) = split(b);
    pa.cmp(pb).then(na.cmp(&nb)).then_with(|| a.cmp(b))
}

/// One respondent's answers, keyed by field id.
///
/// Values are stored as given; constraining them to a question's options is
/// the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseRecord {
    fields: BTreeMap<String, String>,
}

impl ResponseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the value it replaced.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether both `Name` and `Date` are non-empty after trimming.
    pub fn has_identity(&self) -> bool {
        [NAME_FIELD, DATE_FIELD]
            .iter()
            .all(|f| self.get(f).is_some_and(|v| !v.trim().is_empty()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The correct answer for each graded question.
///
/// Entries are kept in natural id order and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct AnswerKey {
    entries: Vec<(String, String)>,
}

impl AnswerKey {
    /// Build a key from any non-empty set of (question, answer) pairs.
    ///
    /// A repeated question id keeps its last answer.
    pub fn new<K, V, I>(answers: I) -> Result<Self, AnswerKeyError>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map: BTreeMap<String, String> = answers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if map.is_empty() {
            return Err(AnswerKeyError::Empty);
        }

        let mut entries: Vec<(String, String)> = map.into_iter().collect();
        entries.sort_by(|a, b| natural_cmp(&a.0, &b.0));
        Ok(Self { entries })
    }

    /// Build a key that must cover exactly the worksheet questions `Q1`..`Q12`.
    pub fn worksheet<K, V, I>(answers: I) -> Result<Self, AnswerKeyError>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let key = Self::new(answers)?;
        key.validate_worksheet()?;
        Ok(key)
    }

    /// Check the worksheet invariant: one entry per `Q1`..`Q12`, nothing else.
    pub fn validate_worksheet(&self) -> Result<(), AnswerKeyError> {
        let expected = question_ids();
        if let Some((id, _)) = self.entries.iter().find(|(id, _)| !expected.contains(id)) {
            return Err(AnswerKeyError::UnknownQuestion(id.clone()));
        }
        if self.entries.len() != QUESTION_COUNT {
            return Err(AnswerKeyError::WrongSize {
                expected: QUESTION_COUNT,
                found: self.entries.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == question)
            .map(|(_, answer)| answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl TryFrom<BTreeMap<String, String>> for AnswerKey {
    type Error = AnswerKeyError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<AnswerKey> for BTreeMap<String, String> {
    fn from(key: AnswerKey) -> Self {
        key.entries.into_iter().collect()
    }
}
