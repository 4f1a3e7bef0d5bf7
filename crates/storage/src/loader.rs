//! CSV parsing for vocabulary and sentence lists.
//!
//! Both formats are two-column files with a header row. Rows that do not have
//! exactly two fields, or whose fields fail domain validation, are skipped and
//! counted instead of aborting the load.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use quiz_core::model::{SentenceItem, VocabularyItem};
use tracing::debug;

use crate::repository::StorageError;

/// Items parsed from one source plus the number of rows that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> LoadReport<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items, skipped: 0 }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Parses `original,translated` word pairs.
///
/// A row whose `original` or `translated` field is blank after trimming (for
/// example `,kosong`) is not a usable question and counts toward `skipped`,
/// the same as a row with the wrong number of fields.
///
/// # Errors
///
/// Returns `StorageError::Csv` only when the underlying reader fails; malformed
/// rows are skipped.
pub fn parse_vocabulary<R: Read>(input: R) -> Result<LoadReport<VocabularyItem>, StorageError> {
    parse_pairs(input, |original, translated| {
        Ok(VocabularyItem::new(original, translated)?)
    })
}

/// Parses `originalSentence,translatedSentence` rows into tokenized sentences.
///
/// Rows whose translated sentence has no words count toward `skipped`.
///
/// # Errors
///
/// Returns `StorageError::Csv` only when the underlying reader fails; malformed
/// rows are skipped.
pub fn parse_sentences<R: Read>(input: R) -> Result<LoadReport<SentenceItem>, StorageError> {
    parse_pairs(input, |original, translated| {
        Ok(SentenceItem::from_text(original, translated)?)
    })
}

fn parse_pairs<T, R, F>(input: R, build: F) -> Result<LoadReport<T>, StorageError>
where
    R: Read,
    F: Fn(&str, &str) -> Result<T, quiz_core::Error>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut report = LoadReport::default();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(error = %err, "skipping unreadable row");
                report.skipped += 1;
                continue;
            }
        }

        let (Some(original), Some(translated), None) =
            (record.get(0), record.get(1), record.get(2))
        else {
            debug!(fields = record.len(), "skipping row without exactly two fields");
            report.skipped += 1;
            continue;
        };

        match build(original, translated) {
            Ok(item) => report.items.push(item),
            Err(err) => {
                debug!(error = %err, "skipping invalid row");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}
