//! Session reducer: every user action flows through [`QuizSession::apply`].
use chrono::{DateTime, Utc};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::config::{Ending, QuestConfig, Question};
use crate::questions::{self, AnswerError};
use crate::scoring;
use crate::seed;
use crate::state::{GameOutcome, SessionState, Settings};
use crate::steps::{Progress, Sequencer, Step};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Next,
    Skip,
    Back,
    SelectOption { question: String, index: usize },
    ToggleOption { question: String, index: usize },
    SetScale { question: String, level: u8 },
    SetText { question: String, text: String },
    GameFinished { game: String, outcome: GameOutcome },
    Confirm,
    Restart,
}

impl Intent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Intent::Next => "next",
            Intent::Skip => "skip",
            Intent::Back => "back",
            Intent::SelectOption { .. } => "select-option",
            Intent::ToggleOption { .. } => "toggle-option",
            Intent::SetScale { .. } => "set-scale",
            Intent::SetText { .. } => "set-text",
            Intent::GameFinished { .. } => "game-finished",
            Intent::Confirm => "confirm",
            Intent::Restart => "restart",
        }
    }
}

/// Side effects the caller should carry out after a successful intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    /// Write the session to storage.
    pub persist: bool,
    /// Fire a confetti burst.
    pub celebrate: bool,
}

impl Effects {
    const fn persist() -> Self {
        Self {
            persist: true,
            celebrate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no question with id '{0}'")]
    UnknownQuestion(String),
    #[error("no game with id '{0}'")]
    UnknownGame(String),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error("'{0}' is not allowed right now")]
    NotAllowed(&'static str),
    #[error("the session is already completed")]
    Completed,
}

/// What the presentation layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Step(usize),
    Ending,
    Confirmation,
}

/// Configuration, resolved steps and session state, owned together.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: QuestConfig,
    sequencer: Sequencer,
    state: SessionState,
}

impl QuizSession {
    /// Begin a brand-new session.
    #[must_use]
    pub fn start(config: QuestConfig, settings: Settings, now: DateTime<Utc>) -> Self {
        Self::resume(config, SessionState::fresh(settings, now))
    }

    /// Continue a stored session at its saved position.
    #[must_use]
    pub fn resume(config: QuestConfig, mut state: SessionState) -> Self {
        let sequencer = Sequencer::new(&config);
        sequencer.clamp_index(&mut state);
        let mut session = Self {
            config,
            sequencer,
            state,
        };
        session.enter_ending();
        session
    }

    #[must_use]
    pub const fn config(&self) -> &QuestConfig {
        &self.config
    }

    #[must_use]
    pub const fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> View {
        if self.state.is_completed() {
            View::Confirmation
        } else if self.sequencer.at_ending(&self.state) {
            View::Ending
        } else {
            View::Step(self.state.current_index)
        }
    }

    /// Step shown by the current view, if it is a normal step.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        match self.view() {
            View::Step(index) => self.sequencer.step(index),
            View::Ending | View::Confirmation => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.sequencer.progress(&self.state)
    }

    /// Navigation is only shown over normal steps.
    #[must_use]
    pub fn shows_navigation(&self) -> bool {
        matches!(self.view(), View::Step(_))
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        !self.state.is_completed() && self.sequencer.can_go_next(&self.state)
    }

    #[must_use]
    pub fn can_skip(&self) -> bool {
        !self.state.is_completed() && self.sequencer.can_skip(&self.state)
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.state.is_completed() && self.sequencer.can_go_back(&self.state)
    }

    /// The resolved ending record, or `None` when it is missing from the config.
    #[must_use]
    pub fn ending(&self) -> Option<&Ending> {
        scoring::ending_for(&self.config, &self.state)
    }

    /// Random stream for one game, stable for this session.
    #[must_use]
    pub fn game_rng(&self, game_id: &str) -> ChaCha20Rng {
        seed::game_rng(seed::session_seed(self.state.started_at), game_id)
    }

    /// Apply an intent stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::apply_at`].
    pub fn apply(&mut self, intent: Intent) -> Result<Effects, SessionError> {
        self.apply_at(intent, Utc::now())
    }

    /// Apply an intent. A rejected intent leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown ids, answers that do not fit the question,
    /// navigation the current step does not allow, or any intent other than
    /// restart once the session is completed.
    pub fn apply_at(
        &mut self,
        intent: Intent,
        now: DateTime<Utc>,
    ) -> Result<Effects, SessionError> {
        if self.state.is_completed() && intent != Intent::Restart {
            return Err(SessionError::Completed);
        }
        log::debug!(
            "applying '{}' at step {}",
            intent.name(),
            self.state.current_index
        );

        match intent {
            Intent::Next => {
                if !self.sequencer.can_go_next(&self.state) {
                    return Err(SessionError::NotAllowed("next"));
                }
                Ok(self.move_forward())
            }
            Intent::Skip => {
                if !self.sequencer.can_skip(&self.state) {
                    return Err(SessionError::NotAllowed("skip"));
                }
                Ok(self.move_forward())
            }
            Intent::Back => {
                if !self.sequencer.can_go_back(&self.state) {
                    return Err(SessionError::NotAllowed("back"));
                }
                self.sequencer.back(&mut self.state);
                Ok(Effects::persist())
            }
            Intent::SelectOption { question, index } => {
                let question = self.question(&question)?;
                questions::select_single(&mut self.state, &question, index)?;
                Ok(Effects::persist())
            }
            Intent::ToggleOption { question, index } => {
                let question = self.question(&question)?;
                questions::toggle_multi(&mut self.state, &self.config, &question, index)?;
                Ok(Effects::persist())
            }
            Intent::SetScale { question, level } => {
                let question = self.question(&question)?;
                questions::set_scale(&mut self.state, &question, level)?;
                Ok(Effects::persist())
            }
            Intent::SetText { question, text } => {
                let question = self.question(&question)?;
                questions::set_short_text(&mut self.state, &question, &text)?;
                Ok(Effects::persist())
            }
            Intent::GameFinished { game, outcome } => {
                if self.config.game(&game).is_none() {
                    return Err(SessionError::UnknownGame(game));
                }
                Ok(self.record_game(game, outcome))
            }
            Intent::Confirm => {
                if self.view() != View::Ending {
                    return Err(SessionError::NotAllowed("confirm"));
                }
                self.state.finalize(now);
                log::debug!("session confirmed at {now}");
                Ok(Effects::persist())
            }
            Intent::Restart => {
                self.state = self.state.restarted(now);
                self.enter_ending();
                Ok(Effects::persist())
            }
        }
    }

    fn question(&self, id: &str) -> Result<Question, SessionError> {
        self.config
            .question(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownQuestion(id.to_string()))
    }

    fn move_forward(&mut self) -> Effects {
        self.sequencer.advance(&mut self.state);
        Effects {
            persist: true,
            celebrate: self.enter_ending(),
        }
    }

    /// A recorded win is kept even if a later attempt at the same game is lost.
    fn record_game(&mut self, game: String, outcome: GameOutcome) -> Effects {
        if self.state.game_won(&game) && !outcome.won {
            log::debug!("keeping earlier win for '{game}'");
            return Effects::default();
        }
        self.state.games.insert(game, outcome);
        Effects {
            persist: true,
            celebrate: outcome.won && self.confetti_enabled(),
        }
    }

    /// Resolve the ending the first time the ending view is reached.
    ///
    /// Returns whether this call resolved it.
    fn enter_ending(&mut self) -> bool {
        if !self.sequencer.at_ending(&self.state) || self.state.ending.is_some() {
            return false;
        }
        scoring::record_ending(&mut self.state);
        self.confetti_enabled()
    }

    /// Whether the ending is on screen and celebrations are enabled.
    ///
    /// A session resumed straight into its ending resolved the ending before it
    /// was saved, so callers use this to celebrate again on entry.
    #[must_use]
    pub fn celebrates_ending(&self) -> bool {
        self.view() == View::Ending && self.confetti_enabled()
    }

    const fn confetti_enabled(&self) -> bool {
        self.config.meta.ui.enable_confetti
    }
}
