use serde::Serialize;
use thiserror::Error;

use crate::evaluator;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SentenceError {
    #[error("translated sentence must contain at least one word")]
    EmptyTranslation,
}

/// A sentence pair for the word-ordering quiz.
///
/// `translated_words` is kept in canonical order; that order is the only
/// accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SentenceItem {
    original_words: Vec<String>,
    translated_words: Vec<String>,
}

impl SentenceItem {
    /// Creates a sentence from pre-tokenized words.
    ///
    /// # Errors
    ///
    /// Returns `SentenceError::EmptyTranslation` if there is nothing to arrange.
    pub fn new(
        original_words: Vec<String>,
        translated_words: Vec<String>,
    ) -> Result<Self, SentenceError> {
        if translated_words.is_empty() {
            return Err(SentenceError::EmptyTranslation);
        }
        Ok(Self {
            original_words,
            translated_words,
        })
    }

    /// Splits both sentences on whitespace and builds the pair.
    ///
    /// # Errors
    ///
    /// Returns `SentenceError::EmptyTranslation` if `translated` has no words.
    pub fn from_text(original: &str, translated: &str) -> Result<Self, SentenceError> {
        Self::new(tokenize(original), tokenize(translated))
    }

    #[must_use]
    pub fn original_words(&self) -> &[String] {
        &self.original_words
    }

    #[must_use]
    pub fn translated_words(&self) -> &[String] {
        &self.translated_words
    }

    /// Number of tokens the learner has to place.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.translated_words.len()
    }

    #[must_use]
    pub fn original_text(&self) -> String {
        self.original_words.join(" ")
    }

    #[must_use]
    pub fn translated_text(&self) -> String {
        self.translated_words.join(" ")
    }

    /// Returns true if `selected` reproduces the translation word for word.
    #[must_use]
    pub fn is_correct_order<S: AsRef<str>>(&self, selected: &[S]) -> bool {
        evaluator::is_correct_order(selected, &self.translated_words)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}
