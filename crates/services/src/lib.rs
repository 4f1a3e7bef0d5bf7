#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    AdvancedSession, AdvancedSnapshot, AnswerFeedback, BeginnerSession, BeginnerSnapshot,
    ChoiceQuestion, QuizEvent, QuizIntent, QuizLoopService, QuizResult, QuizSession,
    QuizSnapshot, SentenceQuestion, SessionPhase, SessionProgress, TokenSelection,
};
