use quiz_core::model::SessionId;
use serde::Serialize;

use super::progress::{AnswerFeedback, SessionPhase};

/// Read-only state of a beginner session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeginnerSnapshot {
    pub session_id: SessionId,
    /// One-based number of the question on screen.
    pub question_number: usize,
    pub total_questions: usize,
    /// The translated word to identify; `None` once finished.
    pub prompt: Option<String>,
    pub options: Vec<String>,
    pub score: usize,
    pub phase: SessionPhase,
    /// Set while an answered question waits for a manual advance.
    pub feedback: Option<AnswerFeedback>,
}

/// Read-only state of an advanced session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedSnapshot {
    pub session_id: SessionId,
    pub question_number: usize,
    pub total_questions: usize,
    /// The sentence to translate, tokenized.
    pub prompt_words: Vec<String>,
    /// Words the learner has to place.
    pub required: usize,
    pub remaining: Vec<String>,
    pub selected: Vec<String>,
    pub score: usize,
    pub phase: SessionPhase,
    pub feedback: Option<AnswerFeedback>,
}
