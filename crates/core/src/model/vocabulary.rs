use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabularyError {
    #[error("original word cannot be empty")]
    EmptyOriginal,

    #[error("translated word cannot be empty")]
    EmptyTranslated,
}

/// One word pair from the vocabulary list.
///
/// The learner is shown `translated` and must pick `original` among the options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VocabularyItem {
    original: String,
    translated: String,
}

impl VocabularyItem {
    /// Creates a word pair.
    ///
    /// # Errors
    ///
    /// Returns `VocabularyError` if either side is blank.
    pub fn new(
        original: impl Into<String>,
        translated: impl Into<String>,
    ) -> Result<Self, VocabularyError> {
        let original = original.into();
        let translated = translated.into();
        if original.trim().is_empty() {
            return Err(VocabularyError::EmptyOriginal);
        }
        if translated.trim().is_empty() {
            return Err(VocabularyError::EmptyTranslated);
        }
        Ok(Self {
            original,
            translated,
        })
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn translated(&self) -> &str {
        &self.translated
    }
}
