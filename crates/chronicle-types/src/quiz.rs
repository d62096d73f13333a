//! Multiple-choice quiz questions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A "which year did this happen" question.
///
/// `options` contains `correct` exactly once, in shuffled order. It holds
/// four entries unless the catalog has too few distinct years to fill
/// three distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Question {
    /// Sequential identifier within one quiz (`q1`, `q2`, ...).
    pub id: String,
    /// Question text referencing the event title.
    pub question: String,
    /// Event description shown as a hint.
    pub description: String,
    /// The correct year.
    pub correct: i32,
    /// Candidate years, including `correct`.
    pub options: Vec<i32>,
}
