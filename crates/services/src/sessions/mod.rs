mod advanced;
mod beginner;
mod cursor;
mod intent;
mod progress;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use advanced::{AdvancedSession, SentenceQuestion, TokenSelection};
pub use beginner::{BeginnerSession, ChoiceQuestion};
pub use intent::{QuizEvent, QuizIntent, QuizSession, QuizSnapshot};
pub use progress::{AnswerFeedback, QuizResult, SessionPhase, SessionProgress};
pub use view::{AdvancedSnapshot, BeginnerSnapshot};
pub use workflow::QuizLoopService;
