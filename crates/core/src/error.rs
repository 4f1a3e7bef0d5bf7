use thiserror::Error;

use crate::generator::GeneratorError;
use crate::model::{SentenceError, SessionConfigError, VocabularyError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
    #[error(transparent)]
    Sentence(#[from] SentenceError),
    #[error(transparent)]
    Config(#[from] SessionConfigError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
