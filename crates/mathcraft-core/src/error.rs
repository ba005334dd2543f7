//! Grading and submission error types.
//!
//! Every failure the core can produce is local and recoverable. The caller
//! decides how to present it; these types carry no user-facing prose beyond
//! their `Display` impls.

use thiserror::Error;

/// Errors raised by the arithmetic helpers of the grading engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// A percentage, fraction or grouping was requested over a zero total.
    #[error("cannot divide by zero (total must be greater than 0)")]
    DivisionByZero,
}

/// Errors raised when finalizing the current attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// `Name` or `Date` was empty (after trimming) at submit time.
    #[error("submission requires both a name and a date")]
    MissingIdentityFields,
}

/// Errors raised while building an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerKeyError {
    /// The key has no entries.
    #[error("answer key is empty")]
    Empty,

    /// A worksheet key must cover exactly Q1..Q12.
    #[error("answer key must contain exactly {expected} questions, found {found}")]
    WrongSize { expected: usize, found: usize },

    /// A worksheet key entry is not one of Q1..Q12.
    #[error("unknown question id in answer key: {0}")]
    UnknownQuestion(String),
}
