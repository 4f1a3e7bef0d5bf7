use quiz_core::model::{Difficulty, SessionId};
use serde::Serialize;

use super::advanced::{AdvancedSession, TokenSelection};
use super::beginner::BeginnerSession;
use super::progress::{AnswerFeedback, QuizResult, SessionProgress};
use super::view::{AdvancedSnapshot, BeginnerSnapshot};
use crate::error::SessionError;

/// User actions the presentation layer forwards to a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizIntent {
    /// Beginner: pick one of the offered options.
    SelectOption(String),
    /// Advanced: pick the next word.
    SelectWord(String),
    /// Advanced: judge the current selection ("Check Answer").
    Evaluate,
    /// Move on after feedback was shown (`AdvanceMode::Manual`).
    Advance,
}

impl QuizIntent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizIntent::SelectOption(_) => "select_option",
            QuizIntent::SelectWord(_) => "select_word",
            QuizIntent::Evaluate => "evaluate",
            QuizIntent::Advance => "advance",
        }
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QuizEvent {
    /// An answer was judged. `finished` is true when it was the last one and the
    /// session already moved past it.
    Answered {
        feedback: AnswerFeedback,
        finished: bool,
    },
    /// A word was taken; more are needed.
    WordSelected { selected: usize, required: usize },
    /// A pending answer was applied.
    Advanced {
        feedback: AnswerFeedback,
        finished: bool,
    },
}

/// Read-only state of either session kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuizSnapshot {
    Beginner(BeginnerSnapshot),
    Advanced(AdvancedSnapshot),
}

/// A running session of either mode behind one command interface.
#[derive(Debug)]
pub enum QuizSession {
    Beginner(BeginnerSession),
    Advanced(AdvancedSession),
}

impl QuizSession {
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        match self {
            QuizSession::Beginner(_) => Difficulty::Beginner,
            QuizSession::Advanced(_) => Difficulty::Advanced,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        match self {
            QuizSession::Beginner(session) => session.id(),
            QuizSession::Advanced(session) => session.id(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            QuizSession::Beginner(session) => session.is_complete(),
            QuizSession::Advanced(session) => session.is_complete(),
        }
    }

    #[must_use]
    pub fn pending_feedback(&self) -> Option<&AnswerFeedback> {
        match self {
            QuizSession::Beginner(session) => session.pending_feedback(),
            QuizSession::Advanced(session) => session.pending_feedback(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        match self {
            QuizSession::Beginner(session) => session.progress(),
            QuizSession::Advanced(session) => session.progress(),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        match self {
            QuizSession::Beginner(session) => session.result(),
            QuizSession::Advanced(session) => session.result(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        match self {
            QuizSession::Beginner(session) => QuizSnapshot::Beginner(session.snapshot()),
            QuizSession::Advanced(session) => QuizSnapshot::Advanced(session.snapshot()),
        }
    }

    /// Apply one user action.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnsupportedIntent` for actions that belong to the
    /// other mode, and otherwise whatever the underlying session reports.
    pub fn dispatch(&mut self, intent: QuizIntent) -> Result<QuizEvent, SessionError> {
        match (self, intent) {
            (QuizSession::Beginner(session), QuizIntent::SelectOption(option)) => {
                let feedback = session.submit_answer(&option)?;
                Ok(QuizEvent::Answered {
                    feedback,
                    finished: session.is_complete(),
                })
            }
            (QuizSession::Advanced(session), QuizIntent::SelectWord(word)) => {
                match session.select_token(&word)? {
                    TokenSelection::Collecting { selected, required } => {
                        Ok(QuizEvent::WordSelected { selected, required })
                    }
                    TokenSelection::Evaluated(feedback) => Ok(QuizEvent::Answered {
                        feedback,
                        finished: session.is_complete(),
                    }),
                }
            }
            (QuizSession::Advanced(session), QuizIntent::Evaluate) => {
                let feedback = session.evaluate()?;
                Ok(QuizEvent::Answered {
                    feedback,
                    finished: session.is_complete(),
                })
            }
            (QuizSession::Beginner(session), QuizIntent::Advance) => {
                let feedback = session.advance()?;
                Ok(QuizEvent::Advanced {
                    feedback,
                    finished: session.is_complete(),
                })
            }
            (QuizSession::Advanced(session), QuizIntent::Advance) => {
                let feedback = session.advance()?;
                Ok(QuizEvent::Advanced {
                    feedback,
                    finished: session.is_complete(),
                })
            }
            (session, intent) => Err(SessionError::UnsupportedIntent {
                intent: intent.name(),
                difficulty: session.difficulty(),
            }),
        }
    }
}
