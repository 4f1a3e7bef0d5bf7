use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::SessionId;
use tracing::{debug, info, warn};

use super::progress::{AnswerFeedback, QuizResult, SessionPhase, SessionProgress};
use crate::error::SessionError;

/// Question sequencing and scoring shared by both quiz modes.
///
/// An answer is first recorded as pending feedback; `advance` applies it to the
/// score and moves the index, so `score <= current` holds at every step.
#[derive(Debug)]
pub(crate) struct Cursor<Q> {
    id: SessionId,
    questions: Vec<Q>,
    current: usize,
    score: usize,
    pool_size: usize,
    pending: Option<AnswerFeedback>,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<Q> Cursor<Q> {
    pub(crate) fn new(questions: Vec<Q>, pool_size: usize, clock: Clock) -> Self {
        let started_at = clock.now();
        Self {
            id: SessionId::random(),
            completed_at: questions.is_empty().then_some(started_at),
            questions,
            current: 0,
            score: 0,
            pool_size,
            pending: None,
            clock,
            started_at,
        }
    }

    /// Swap the clock and restamp the start time.
    pub(crate) fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
        self.started_at = clock.now();
        if self.completed_at.is_some() {
            self.completed_at = Some(self.started_at);
        }
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    pub(crate) fn questions(&self) -> &[Q] {
        &self.questions
    }

    pub(crate) fn total(&self) -> usize {
        self.questions.len()
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current
    }

    /// One-based number of the question on screen, capped at the total.
    pub(crate) fn question_number(&self) -> usize {
        (self.current + 1).min(self.total())
    }

    pub(crate) fn score(&self) -> usize {
        self.score
    }

    pub(crate) fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub(crate) fn pending(&self) -> Option<&AnswerFeedback> {
        self.pending.as_ref()
    }

    pub(crate) fn current(&self) -> Option<&Q> {
        self.questions.get(self.current)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub(crate) fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        }
    }

    /// Returns the current question if it can take an answer.
    pub(crate) fn answerable(&self) -> Result<&Q, SessionError> {
        let Some(question) = self.questions.get(self.current) else {
            warn!(session_id = %self.id, "answer submitted after session finished");
            return Err(SessionError::Completed);
        };
        if self.pending.is_some() {
            return Err(SessionError::FeedbackPending);
        }
        Ok(question)
    }

    pub(crate) fn record(
        &mut self,
        correct: bool,
        expected: String,
        submitted: String,
    ) -> AnswerFeedback {
        debug!(
            session_id = %self.id,
            question = self.current,
            correct,
            "answer evaluated"
        );
        let feedback = AnswerFeedback {
            question_index: self.current,
            correct,
            expected,
            submitted,
        };
        self.pending = Some(feedback.clone());
        feedback
    }

    pub(crate) fn advance(&mut self) -> Result<AnswerFeedback, SessionError> {
        let Some(feedback) = self.pending.take() else {
            if self.is_complete() {
                warn!(session_id = %self.id, "advance requested after session finished");
                return Err(SessionError::Completed);
            }
            return Err(SessionError::NothingToAdvance);
        };

        if feedback.correct {
            self.score += 1;
        }
        self.current += 1;

        if self.is_complete() {
            self.completed_at = Some(self.clock.now());
            info!(
                session_id = %self.id,
                score = self.score,
                total = self.questions.len(),
                "quiz session finished"
            );
        }
        Ok(feedback)
    }

    pub(crate) fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.current,
            remaining: self.total().saturating_sub(self.current),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    pub(crate) fn result(&self) -> Option<QuizResult> {
        let completed_at = self.completed_at?;
        Some(QuizResult {
            session_id: self.id,
            score: self.score,
            total: self.total(),
            pool_size: self.pool_size,
            started_at: self.started_at,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn cursor(len: usize) -> Cursor<usize> {
        Cursor::new((0..len).collect(), len, fixed_clock())
    }

    #[test]
    fn record_then_advance_moves_score_and_index_together() {
        let mut cursor = cursor(2);
        cursor.answerable().unwrap();
        cursor.record(true, "a".into(), "a".into());
        assert_eq!(cursor.score(), 0);
        assert_eq!(cursor.current_index(), 0);

        let applied = cursor.advance().unwrap();
        assert!(applied.correct);
        assert_eq!(cursor.score(), 1);
        assert_eq!(cursor.current_index(), 1);
        assert_eq!(cursor.phase(), SessionPhase::Active);
    }

    #[test]
    fn pending_feedback_blocks_another_answer() {
        let mut cursor = cursor(2);
        cursor.record(false, "a".into(), "b".into());
        assert!(matches!(
            cursor.answerable(),
            Err(SessionError::FeedbackPending)
        ));
    }

    #[test]
    fn advance_without_answer_is_rejected() {
        let mut cursor = cursor(1);
        assert!(matches!(
            cursor.advance(),
            Err(SessionError::NothingToAdvance)
        ));
    }

    #[test]
    fn finishing_stamps_completion() {
        let mut cursor = cursor(1);
        assert!(cursor.result().is_none());
        cursor.record(false, "a".into(), "b".into());
        cursor.advance().unwrap();

        assert_eq!(cursor.phase(), SessionPhase::Finished);
        assert!(matches!(cursor.answerable(), Err(SessionError::Completed)));
        assert!(matches!(cursor.advance(), Err(SessionError::Completed)));

        let result = cursor.result().unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 1);
        assert_eq!(result.completed_at, fixed_now());
    }

    #[test]
    fn empty_cursor_starts_finished() {
        let cursor = cursor(0);
        assert!(cursor.is_complete());
        assert_eq!(cursor.question_number(), 0);
        assert!(cursor.result().is_some());
    }
}
