use chrono::{DateTime, Utc};
use quiz_core::model::SessionId;
use serde::Serialize;

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    Finished,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: usize,
    pub is_complete: bool,
}

/// Outcome of judging one answer.
///
/// This is the signal the feedback layer keys its sound or animation on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    /// Zero-based position of the judged question in the session.
    pub question_index: usize,
    pub correct: bool,
    pub expected: String,
    pub submitted: String,
}

/// Final tally of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub session_id: SessionId,
    pub score: usize,
    pub total: usize,
    pub pool_size: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Fraction of questions answered correctly, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }
}
