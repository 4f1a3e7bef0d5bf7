#![forbid(unsafe_code)]

pub mod loader;
pub mod repository;

pub use loader::{LoadReport, parse_sentences, parse_vocabulary};
pub use repository::{
    ContentRepository, CsvContentRepository, InMemoryRepository, StorageError,
};
