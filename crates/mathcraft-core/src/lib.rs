//! mathcraft-core: Grading engine, response store and worksheet model.
//!
//! This crate holds everything about the algebra notation worksheet that is
//! not presentation: the question bank and answer key, scoring of single
//! attempts, class aggregates, the submission log and its CSV form, and the
//! geometry the worksheet's pictures are drawn from.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grading;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod store;
pub mod worksheet;

pub use error::{AnswerKeyError, GradingError, SubmitError};
pub use export::{export_csv, import_csv};
pub use grading::{percentage, score, ScoreResult};
pub use model::{AnswerKey, ResponseRecord};
pub use statistics::{aggregate, compute_aggregate_stats, AggregateStats};
pub use store::{try_submit, ResponseStore, SubmissionLog};
pub use worksheet::Worksheet;
