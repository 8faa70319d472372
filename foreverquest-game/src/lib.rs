//! Foreverquest Engine
//!
//! Platform-agnostic core of the Foreverquest narrative quiz: configuration
//! model, step sequencing, answer handling, mini-game engines, ending
//! resolution and session persistence. No UI or browser dependencies.

pub mod celebration;
pub mod config;
pub mod constants;
pub mod games;
pub mod paths;
pub mod questions;
pub mod scoring;
pub mod seed;
pub mod session;
pub mod state;
pub mod steps;
pub mod storage;

// Re-export commonly used types
pub use celebration::{CONFETTI_COLORS, ConfettiPiece, confetti};
pub use config::{
    ConfigError, Ending, GalleryImage, GameKind, GameSettings, GameSpec, Interlude, Meta,
    QuestConfig, Question, QuestionKind, SequenceEntry, SequenceKind, UiFlags,
};
pub use games::{GameBoard, MiniGame};
pub use paths::{PathScores, PathTag, UnknownPathTag};
pub use questions::AnswerError;
pub use scoring::{record_ending, resolve_path};
pub use seed::{derive_game_seed, game_rng, session_seed};
pub use session::{Effects, Intent, QuizSession, SessionError, View};
pub use state::{Answer, GameOutcome, Selection, SessionState, Settings};
pub use steps::{Progress, Sequencer, Step, resolve_steps};
pub use storage::{MemoryStorage, Resume, StoreError, load_resumable, save_session};

use chrono::{DateTime, Utc};

/// Trait for abstracting where the quest document comes from
/// Platform-specific implementations should provide this
pub trait ConfigLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and parse the quest configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    fn load_config(&self) -> Result<QuestConfig, Self::Error>;
}

/// Trait for abstracting the key/value store the session lives in
/// Platform-specific implementations should provide this
pub trait SessionStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// Loader over the quest document compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledConfig;

impl ConfigLoader for BundledConfig {
    type Error = ConfigError;

    fn load_config(&self) -> Result<QuestConfig, Self::Error> {
        QuestConfig::bundled()
    }
}

/// Main engine pairing a config source with session storage
pub struct QuizEngine<L, S>
where
    L: ConfigLoader,
    S: SessionStorage,
{
    loader: L,
    storage: S,
}

impl<L, S> QuizEngine<L, S>
where
    L: ConfigLoader,
    S: SessionStorage,
{
    /// Create a new engine with the provided loader and storage
    pub const fn new(loader: L, storage: S) -> Self {
        Self { loader, storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Start a brand-new session
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn start(&self, settings: Settings, now: DateTime<Utc>) -> Result<QuizSession, L::Error> {
        let config = self.loader.load_config()?;
        Ok(QuizSession::start(config, settings, now))
    }

    /// Load a stored unfinished session, if there is one
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or storage fails.
    pub fn resume(&self) -> Result<Option<QuizSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        match load_resumable(&self.storage).map_err(Into::into)? {
            Resume::Resumable(state) => {
                let config = self.loader.load_config().map_err(Into::into)?;
                Ok(Some(QuizSession::resume(config, state)))
            }
            Resume::Fresh => Ok(None),
        }
    }

    /// Persist the session
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be encoded or written.
    pub fn save(&self, session: &QuizSession) -> Result<(), StoreError<S::Error>> {
        save_session(&self.storage, session.state())
    }

    /// Apply an intent and carry out its persist effect
    ///
    /// # Errors
    ///
    /// Returns an error if the intent is rejected or the save fails.
    pub fn dispatch(
        &self,
        session: &mut QuizSession,
        intent: Intent,
        now: DateTime<Utc>,
    ) -> Result<Effects, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let effects = session.apply_at(intent, now)?;
        if effects.persist {
            self.save(session).map_err(|err| -> anyhow::Error {
                match err {
                    StoreError::Backend(inner) => inner.into(),
                    StoreError::Encode(inner) => inner.into(),
                }
            })?;
        }
        Ok(effects)
    }
}
