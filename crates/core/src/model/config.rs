use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionConfigError {
    #[error("sample size must be > 0")]
    InvalidSampleSize,

    #[error("options per question must be at least 2, got {0}")]
    InvalidOptionsPerQuestion(usize),
}

//
// ─── ADVANCE MODE ──────────────────────────────────────────────────────────────
//

/// Controls when an answered question hands over to the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Answering moves to the next question in the same call.
    #[default]
    Immediate,
    /// Answering parks the feedback; the caller moves on with an explicit advance.
    Manual,
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Per-session quiz settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    sample_size: usize,
    options_per_question: usize,
    advance_mode: AdvanceMode,
}

impl SessionConfig {
    /// Questions per game.
    pub const DEFAULT_SAMPLE_SIZE: usize = 10;
    /// Choices shown per beginner question, including the correct one.
    pub const DEFAULT_OPTIONS_PER_QUESTION: usize = 4;

    /// Creates validated settings with `AdvanceMode::Immediate`.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError` if `sample_size` is zero or fewer than two
    /// options are requested.
    pub fn new(sample_size: usize, options_per_question: usize) -> Result<Self, SessionConfigError> {
        if sample_size == 0 {
            return Err(SessionConfigError::InvalidSampleSize);
        }
        if options_per_question < 2 {
            return Err(SessionConfigError::InvalidOptionsPerQuestion(
                options_per_question,
            ));
        }
        Ok(Self {
            sample_size,
            options_per_question,
            advance_mode: AdvanceMode::Immediate,
        })
    }

    #[must_use]
    pub fn with_advance_mode(mut self, advance_mode: AdvanceMode) -> Self {
        self.advance_mode = advance_mode;
        self
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn options_per_question(&self) -> usize {
        self.options_per_question
    }

    #[must_use]
    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
            options_per_question: Self::DEFAULT_OPTIONS_PER_QUESTION,
            advance_mode: AdvanceMode::Immediate,
        }
    }
}
