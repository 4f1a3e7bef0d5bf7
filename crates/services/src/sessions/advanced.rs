use std::fmt;

use quiz_core::generator;
use quiz_core::model::{AdvanceMode, SentenceItem, SessionConfig, SessionId};
use quiz_core::Clock;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::cursor::Cursor;
use super::progress::{AnswerFeedback, QuizResult, SessionPhase, SessionProgress};
use super::view::AdvancedSnapshot;
use crate::error::SessionError;

/// A sentence together with the shuffled words offered to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceQuestion {
    item: SentenceItem,
    word_pool: Vec<String>,
}

impl SentenceQuestion {
    #[must_use]
    pub fn item(&self) -> &SentenceItem {
        &self.item
    }

    #[must_use]
    pub fn word_pool(&self) -> &[String] {
        &self.word_pool
    }
}

/// Result of picking one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSelection {
    /// More words are needed before the sentence can be judged.
    Collecting { selected: usize, required: usize },
    /// The last slot was filled and the sentence was judged.
    Evaluated(AnswerFeedback),
}

/// Sentence-construction session: the learner rebuilds each translation by
/// picking words from a shuffled pool, in order.
pub struct AdvancedSession {
    cursor: Cursor<SentenceQuestion>,
    remaining: Vec<String>,
    selected: Vec<String>,
    advance_mode: AdvanceMode,
}

impl AdvancedSession {
    /// Sample sentences from `pool` and shuffle each one's word pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Generator` with `EmptyPool` if `pool` is empty.
    pub fn start<R>(
        pool: &[SentenceItem],
        config: &SessionConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError>
    where
        R: Rng + ?Sized,
    {
        let questions: Vec<SentenceQuestion> =
            generator::build_sequence(rng, pool, config.sample_size())?
                .into_iter()
                .map(|item| {
                    let word_pool = generator::shuffled_tokens(rng, item.translated_words());
                    SentenceQuestion { item, word_pool }
                })
                .collect();
        let remaining = questions
            .first()
            .map(|question| question.word_pool.clone())
            .unwrap_or_default();

        let session = Self {
            cursor: Cursor::new(questions, pool.len(), Clock::system()),
            remaining,
            selected: Vec::new(),
            advance_mode: config.advance_mode(),
        };
        info!(
            session_id = %session.id(),
            questions = session.total_questions(),
            pool_size = pool.len(),
            "advanced session started"
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
    pub fn questions(&self) -> &[SentenceQuestion] {
        self.cursor.questions()
    }

    /// The sentence being built, or `None` once the session is finished.
    #[must_use]
    pub fn current_sentence(&self) -> Option<&SentenceItem> {
        self.cursor.current().map(SentenceQuestion::item)
    }

    /// Words still available to pick for the current sentence.
    #[must_use]
    pub fn remaining_words(&self) -> &[String] {
        &self.remaining
    }

    /// Words picked so far, in pick order.
    #[must_use]
    pub fn selected_words(&self) -> &[String] {
        &self.selected
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

    #[must_use]
    pub fn pending_feedback(&self) -> Option<&AnswerFeedback> {
        self.cursor.pending()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.cursor.progress()
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.cursor.result()
    }

    /// Pick `word` as the next token of the answer.
    ///
    /// Exactly one occurrence is taken from the remaining words (the first
    /// match), so repeated words must be picked once per occurrence. Filling the
    /// last slot judges the sentence immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::TokenUnavailable` if `word` is not among the
    /// remaining words, `SessionError::FeedbackPending` while a manual advance is
    /// outstanding, and `SessionError::Completed` after the last sentence.
    pub fn select_token(&mut self, word: &str) -> Result<TokenSelection, SessionError> {
        let required = self.cursor.answerable()?.item.word_count();
        let Some(position) = self.remaining.iter().position(|w| w == word) else {
            return Err(SessionError::TokenUnavailable(word.to_owned()));
        };

        let token = self.remaining.remove(position);
        self.selected.push(token);

        if self.selected.len() == required {
            return self.evaluate().map(TokenSelection::Evaluated);
        }
        Ok(TokenSelection::Collecting {
            selected: self.selected.len(),
            required,
        })
    }

    /// Judge the picked words against the canonical order.
    ///
    /// Only a full positional match scores; there is no partial credit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteSelection` (state unchanged) when not
    /// every slot is filled yet, plus the errors of [`Self::select_token`].
    pub fn evaluate(&mut self) -> Result<AnswerFeedback, SessionError> {
        let question = self.cursor.answerable()?;
        let required = question.item.word_count();
        if self.selected.len() != required {
            debug!(
                session_id = %self.cursor.id(),
                selected = self.selected.len(),
                required,
                "evaluation requested before selection was complete"
            );
            return Err(SessionError::IncompleteSelection {
                selected: self.selected.len(),
                required,
            });
        }

        let correct = question.item.is_correct_order(&self.selected);
        let expected = question.item.translated_text();
        let feedback = self
            .cursor
            .record(correct, expected, self.selected.join(" "));

        if self.advance_mode == AdvanceMode::Immediate {
            self.advance()?;
        }
        Ok(feedback)
    }

    /// Apply the pending answer, clear the selection and load the next word pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToAdvance` if no answer is pending, or
    /// `SessionError::Completed` after the last sentence.
    pub fn advance(&mut self) -> Result<AnswerFeedback, SessionError> {
        let feedback = self.cursor.advance()?;
        self.selected.clear();
        self.remaining = self
            .cursor
            .current()
            .map(|question| question.word_pool.clone())
            .unwrap_or_default();
        Ok(feedback)
    }

    #[must_use]
    pub fn snapshot(&self) -> AdvancedSnapshot {
        let sentence = self.current_sentence();
        AdvancedSnapshot {
            session_id: self.id(),
            question_number: self.cursor.question_number(),
            total_questions: self.total_questions(),
            prompt_words: sentence
                .map(|s| s.original_words().to_vec())
                .unwrap_or_default(),
            required: sentence.map_or(0, SentenceItem::word_count),
            remaining: self.remaining.clone(),
            selected: self.selected.clone(),
            score: self.score(),
            phase: self.phase(),
            feedback: self.pending_feedback().cloned(),
        }
    }
}

impl fmt::Debug for AdvancedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvancedSession")
            .field("id", &self.id())
            .field("questions_len", &self.total_questions())
            .field("current", &self.current_index())
            .field("score", &self.score())
            .field("selected", &self.selected)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
