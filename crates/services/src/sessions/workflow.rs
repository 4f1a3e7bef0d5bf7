use std::sync::Arc;

use quiz_core::model::{Difficulty, SessionConfig};
use rand::Rng;
use storage::ContentRepository;
use tracing::{info, warn};

use super::advanced::AdvancedSession;
use super::beginner::BeginnerSession;
use super::intent::QuizSession;
use crate::error::SessionError;
use crate::Clock;

/// Orchestrates content loading and session start.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    content: Arc<dyn ContentRepository>,
    config: SessionConfig,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, content: Arc<dyn ContentRepository>, config: SessionConfig) -> Self {
        Self {
            clock,
            content,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Load the pool for `difficulty` and start a session drawn with `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if content cannot be loaded and
    /// `SessionError::Generator` if the pool cannot support a session.
    pub async fn start_session<R>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError>
    where
        R: Rng + ?Sized,
    {
        let session = match difficulty {
            Difficulty::Beginner => {
                let report = self.content.vocabulary().await?;
                note_skipped(difficulty, report.skipped);
                BeginnerSession::start(&report.items, &self.config, rng)
                    .map(|session| QuizSession::Beginner(session.with_clock(self.clock)))
            }
            Difficulty::Advanced => {
                let report = self.content.sentences().await?;
                note_skipped(difficulty, report.skipped);
                AdvancedSession::start(&report.items, &self.config, rng)
                    .map(|session| QuizSession::Advanced(session.with_clock(self.clock)))
            }
        };

        match &session {
            Ok(session) => info!(session_id = %session.id(), %difficulty, "quiz ready"),
            Err(err) => warn!(%difficulty, error = %err, "could not start quiz"),
        }
        session
    }
}

fn note_skipped(difficulty: Difficulty, skipped: usize) {
    if skipped > 0 {
        warn!(%difficulty, skipped, "malformed content rows were skipped");
    }
}
