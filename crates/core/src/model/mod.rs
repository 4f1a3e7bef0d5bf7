mod config;
mod difficulty;
mod ids;
mod sentence;
mod vocabulary;

pub use config::{AdvanceMode, SessionConfig, SessionConfigError};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::SessionId;
pub use sentence::{SentenceError, SentenceItem};
pub use vocabulary::{VocabularyError, VocabularyItem};
