use std::fmt;

use quiz_core::evaluator;
use quiz_core::generator;
use quiz_core::model::{AdvanceMode, SessionConfig, SessionId, VocabularyItem};
use quiz_core::Clock;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::cursor::Cursor;
use super::progress::{AnswerFeedback, QuizResult, SessionPhase, SessionProgress};
use super::view::BeginnerSnapshot;
use crate::error::SessionError;

/// A vocabulary question together with its shuffled answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceQuestion {
    item: VocabularyItem,
    options: Vec<String>,
}

impl ChoiceQuestion {
    #[must_use]
    pub fn item(&self) -> &VocabularyItem {
        &self.item
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Multiple-choice vocabulary session.
///
/// Option sets for every question are drawn when the session starts, so a pool
/// that cannot supply enough distinct options fails up front instead of halfway
/// through the game.
pub struct BeginnerSession {
    cursor: Cursor<ChoiceQuestion>,
    advance_mode: AdvanceMode,
}

impl BeginnerSession {
    /// Sample questions from `pool` and build their option sets.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` with `EmptyPool` when there is nothing to
    /// ask, or `InsufficientDistractors` when the pool has too few distinct words.
    pub fn start<R>(
        pool: &[VocabularyItem],
        config: &SessionConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError>
    where
        R: Rng + ?Sized,
    {
        let sequence = generator::build_sequence(rng, pool, config.sample_size())?;

        let mut questions = Vec::with_capacity(sequence.len());
        for item in sequence {
            let options = generator::build_distractors(
                rng,
                item.original(),
                pool,
                config.options_per_question(),
            )?;
            questions.push(ChoiceQuestion { item, options });
        }

        let session = Self {
            cursor: Cursor::new(questions, pool.len(), Clock::system()),
            advance_mode: config.advance_mode(),
        };
        info!(
            session_id = %session.id(),
            questions = session.total_questions(),
            pool_size = pool.len(),
            "beginner session started"
        );
        Ok(session)
    }

    /// Use `clock` for the start and completion timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.cursor.set_clock(clock);
        self
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.cursor.id()
    }

    #[must_use]
    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }

    #[must_use]
    pub fn questions(&self) -> &[ChoiceQuestion] {
        self.cursor.questions()
    }

    /// The word being asked, or `None` once the session is finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&VocabularyItem> {
        self.cursor.current().map(ChoiceQuestion::item)
    }

    /// Options for the current question; empty once the session is finished.
    #[must_use]
    pub fn current_options(&self) -> &[String] {
        match self.cursor.current() {
            Some(question) => &question.options,
            None => &[],
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor.current_index()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.cursor.score()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.cursor.total()
    }

    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.cursor.pool_size()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.cursor.phase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor.is_complete()
    }

    /// Feedback waiting for `advance` when running in `AdvanceMode::Manual`.
    #[must_use]
    pub fn pending_feedback(&self) -> Option<&AnswerFeedback> {
        self.cursor.pending()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.cursor.progress()
    }

    /// Final tally; `None` until the last question has been advanced past.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.cursor.result()
    }

    /// Judge `selected` against the current word.
    ///
    /// The answer is accepted whether or not it is right; there is no retry. In
    /// `AdvanceMode::Immediate` the session moves to the next question before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last question and
    /// `SessionError::FeedbackPending` while a manual advance is outstanding.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerFeedback, SessionError> {
        let question = self.cursor.answerable()?;
        let expected = question.item.original().to_owned();
        let correct = evaluator::is_correct_choice(selected, &expected);
        let feedback = self.cursor.record(correct, expected, selected.to_owned());

        if self.advance_mode == AdvanceMode::Immediate {
            self.cursor.advance()?;
        }
        Ok(feedback)
    }

    /// Apply the pending answer and move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToAdvance` if no answer is pending, or
    /// `SessionError::Completed` after the last question.
    pub fn advance(&mut self) -> Result<AnswerFeedback, SessionError> {
        self.cursor.advance()
    }

    #[must_use]
    pub fn snapshot(&self) -> BeginnerSnapshot {
        BeginnerSnapshot {
            session_id: self.id(),
            question_number: self.cursor.question_number(),
            total_questions: self.total_questions(),
            prompt: self.current_question().map(|item| item.translated().to_owned()),
            options: self.current_options().to_vec(),
            score: self.score(),
            phase: self.phase(),
            feedback: self.pending_feedback().cloned(),
        }
    }
}

impl fmt::Debug for BeginnerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeginnerSession")
            .field("id", &self.id())
            .field("questions_len", &self.total_questions())
            .field("current", &self.current_index())
            .field("score", &self.score())
            .field("advance_mode", &self.advance_mode)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::generator::GeneratorError;
    use quiz_core::time::{fixed_clock, fixed_now};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> Vec<VocabularyItem> {
        [
            ("eat", "makan"),
            ("drink", "minum"),
            ("sleep", "tidur"),
            ("read", "baca"),
            ("write", "tulis"),
            ("walk", "jalan"),
        ]
        .iter()
        .map(|(o, t)| VocabularyItem::new(*o, *t).unwrap())
        .collect()
    }

    fn start(sample: usize, seed: u64) -> BeginnerSession {
        let config = SessionConfig::new(sample, 4).unwrap();
        BeginnerSession::start(&pool(), &config, &mut StdRng::seed_from_u64(seed))
            .unwrap()
            .with_clock(fixed_clock())
    }

    fn wrong_answer(session: &BeginnerSession) -> String {
        let expected = session.current_question().unwrap().original();
        session
            .current_options()
            .iter()
            .find(|o| o.as_str() != expected)
            .cloned()
            .unwrap()
    }

    #[test]
    fn every_question_has_four_options_with_the_answer() {
        let session = start(5, 7);
        assert_eq!(session.total_questions(), 5);
        assert_eq!(session.pool_size(), 6);
        for question in session.questions() {
            assert_eq!(question.options().len(), 4);
            assert!(question.options().iter().any(|o| o == question.item().original()));
        }
    }

    #[test]
    fn correct_answer_scores_and_advances() {
        let mut session = start(5, 1);
        let answer = session.current_question().unwrap().original().to_owned();

        let feedback = session.submit_answer(&answer).unwrap();

        assert!(feedback.correct);
        assert_eq!(feedback.question_index, 0);
        assert_eq!(session.score(), 1);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn wrong_answer_still_advances() {
        let mut session = start(5, 1);
        let wrong = wrong_answer(&session);

        let feedback = session.submit_answer(&wrong).unwrap();

        assert!(!feedback.correct);
        assert_eq!(feedback.submitted, wrong);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn answers_after_finish_are_rejected_without_changing_score() {
        let mut session = start(1, 3);
        let answer = session.current_question().unwrap().original().to_owned();
        session.submit_answer(&answer).unwrap();
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert!(session.current_options().is_empty());

        let err = session.submit_answer(&answer).unwrap_err();
        assert!(matches!(err, SessionError::Completed));
        assert_eq!(session.score(), 1);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn manual_mode_waits_for_advance() {
        let config = SessionConfig::new(2, 4)
            .unwrap()
            .with_advance_mode(AdvanceMode::Manual);
        let mut session =
            BeginnerSession::start(&pool(), &config, &mut StdRng::seed_from_u64(2)).unwrap();
        let answer = session.current_question().unwrap().original().to_owned();

        session.submit_answer(&answer).unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.pending_feedback().unwrap().correct);
        assert!(matches!(
            session.submit_answer(&answer),
            Err(SessionError::FeedbackPending)
        ));

        session.advance().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 1);
        assert!(session.pending_feedback().is_none());
    }

    #[test]
    fn result_is_stable_once_finished() {
        let mut session = start(2, 4);
        while !session.is_complete() {
            let wrong = wrong_answer(&session);
            session.submit_answer(&wrong).unwrap();
        }

        let first = session.result().unwrap();
        let second = session.result().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.score, 0);
        assert_eq!(first.total, 2);
        assert_eq!(first.completed_at, fixed_now());
    }

    #[test]
    fn small_pool_fails_to_start() {
        let pool = vec![
            VocabularyItem::new("eat", "makan").unwrap(),
            VocabularyItem::new("drink", "minum").unwrap(),
        ];
        let err = BeginnerSession::start(
            &pool,
            &SessionConfig::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Generator(GeneratorError::InsufficientDistractors { .. })
        ));
    }

    #[test]
    fn empty_pool_fails_to_start() {
        let err = BeginnerSession::start(
            &[],
            &SessionConfig::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Generator(GeneratorError::EmptyPool)
        ));
    }

    #[test]
    fn snapshot_shows_translated_prompt() {
        let session = start(3, 8);
        let snapshot = session.snapshot();
        let item = session.current_question().unwrap();

        assert_eq!(snapshot.prompt.as_deref(), Some(item.translated()));
        assert_eq!(snapshot.options, session.current_options());
        assert_eq!(snapshot.question_number, 1);
        assert_eq!(snapshot.total_questions, 3);
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert!(snapshot.feedback.is_none());
    }
}
