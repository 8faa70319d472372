use crate::app::phase::Phase;
use crate::game::{ConfettiPiece, QuestConfig, QuizSession, SessionState};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub phase: UseStateHandle<Phase>,
    pub config: UseStateHandle<Option<QuestConfig>>,
    pub session: UseStateHandle<Option<QuizSession>>,
    /// Saved progress waiting on the resume prompt.
    pub pending: UseStateHandle<Option<SessionState>>,
    pub load_error: UseStateHandle<Option<AttrValue>>,
    pub confetti: UseStateHandle<Rc<Vec<ConfettiPiece>>>,
    /// Bumped on every celebration so the confetti layer restarts its timer.
    pub confetti_burst: UseStateHandle<u32>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        phase: use_state(|| Phase::Loading),
        config: use_state(|| None::<QuestConfig>),
        session: use_state(|| None::<QuizSession>),
        pending: use_state(|| None::<SessionState>),
        load_error: use_state(|| None::<AttrValue>),
        confetti: use_state(|| Rc::new(Vec::<ConfettiPiece>::new())),
        confetti_burst: use_state(|| 0_u32),
    }
}

impl AppState {
    /// Title from the loaded quest, or a neutral fallback while loading.
    #[must_use]
    pub fn app_title(&self) -> AttrValue {
        self.config
            .as_ref()
            .map(|cfg| cfg.meta.app_title.as_str())
            .filter(|title| !title.is_empty())
            .map_or_else(|| AttrValue::from("Our Story"), |title| AttrValue::from(title.to_owned()))
    }
}
