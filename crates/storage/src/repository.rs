use async_trait::async_trait;
use quiz_core::model::{SentenceItem, VocabularyItem};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

use crate::loader::{LoadReport, parse_sentences, parse_vocabulary};

/// Errors surfaced by content sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("content file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Source of quiz content: the vocabulary pool for beginner games and the
/// sentence pool for advanced games.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load every vocabulary pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read.
    async fn vocabulary(&self) -> Result<LoadReport<VocabularyItem>, StorageError>;

    /// Load every sentence pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read.
    async fn sentences(&self) -> Result<LoadReport<SentenceItem>, StorageError>;
}

/// Reads the two CSV files from disk on every load.
#[derive(Debug, Clone)]
pub struct CsvContentRepository {
    vocabulary_path: PathBuf,
    sentences_path: PathBuf,
}

impl CsvContentRepository {
    #[must_use]
    pub fn new(vocabulary_path: impl Into<PathBuf>, sentences_path: impl Into<PathBuf>) -> Self {
        Self {
            vocabulary_path: vocabulary_path.into(),
            sentences_path: sentences_path.into(),
        }
    }

    #[must_use]
    pub fn vocabulary_path(&self) -> &Path {
        &self.vocabulary_path
    }

    #[must_use]
    pub fn sentences_path(&self) -> &Path {
        &self.sentences_path
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, StorageError> {
    debug!(path = %path.display(), "reading content file");
    tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(path.to_path_buf())
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[async_trait]
impl ContentRepository for CsvContentRepository {
    async fn vocabulary(&self) -> Result<LoadReport<VocabularyItem>, StorageError> {
        let bytes = read_file(&self.vocabulary_path).await?;
        parse_vocabulary(bytes.as_slice())
    }

    async fn sentences(&self) -> Result<LoadReport<SentenceItem>, StorageError> {
        let bytes = read_file(&self.sentences_path).await?;
        parse_sentences(bytes.as_slice())
    }
}

/// Simple in-memory content source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    vocabulary: Arc<Mutex<Vec<VocabularyItem>>>,
    sentences: Arc<Mutex<Vec<SentenceItem>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn push_vocabulary(&self, item: VocabularyItem) -> Result<(), StorageError> {
        let mut guard = self
            .vocabulary
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(item);
        Ok(())
    }

    /// Append a sentence pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn push_sentence(&self, item: SentenceItem) -> Result<(), StorageError> {
        let mut guard = self
            .sentences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(item);
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn vocabulary(&self) -> Result<LoadReport<VocabularyItem>, StorageError> {
        let guard = self
            .vocabulary
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(LoadReport::new(guard.clone()))
    }

    async fn sentences(&self) -> Result<LoadReport<SentenceItem>, StorageError> {
        let guard = self
            .sentences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(LoadReport::new(guard.clone()))
    }
}
