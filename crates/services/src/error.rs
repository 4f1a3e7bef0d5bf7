//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::generator::GeneratorError;
use quiz_core::model::Difficulty;
use storage::StorageError;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("selected {selected} of {required} words")]
    IncompleteSelection { selected: usize, required: usize },
    #[error("word `{0}` is not among the remaining options")]
    TokenUnavailable(String),
    #[error("session already completed")]
    Completed,
    #[error("feedback for the current question has not been acknowledged")]
    FeedbackPending,
    #[error("no answered question to advance from")]
    NothingToAdvance,
    #[error("`{intent}` is not supported in {difficulty} sessions")]
    UnsupportedIntent {
        intent: &'static str,
        difficulty: Difficulty,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// True for conditions the presentation layer can ignore and keep collecting input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SessionError::IncompleteSelection { .. }
                | SessionError::TokenUnavailable(_)
                | SessionError::FeedbackPending
                | SessionError::NothingToAdvance
                | SessionError::UnsupportedIntent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_are_not_recoverable() {
        assert!(!SessionError::Generator(GeneratorError::EmptyPool).is_recoverable());
        assert!(!SessionError::Completed.is_recoverable());
        assert!(
            SessionError::IncompleteSelection {
                selected: 1,
                required: 3
            }
            .is_recoverable()
        );
    }
}
