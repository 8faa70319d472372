use crate::app::phase::{Phase, status_for};
use crate::app::state::AppState;
use crate::game::{ConfettiPiece, Intent, QuizSession};
use chrono::Utc;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppHandlers {
    pub dispatch: Callback<Intent>,
    pub continue_saved: Callback<()>,
    pub start_over: Callback<()>,
    pub clear_confetti: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            dispatch: build_dispatch(state),
            continue_saved: build_continue_saved(state),
            start_over: build_start_over(state),
            clear_confetti: build_clear_confetti(state),
        }
    }
}

fn launch_confetti(
    confetti: &UseStateHandle<Rc<Vec<ConfettiPiece>>>,
    burst: &UseStateHandle<u32>,
    session: &QuizSession,
) {
    let mut rng = crate::game::seed::named_rng(crate::dom::entropy_seed(), "confetti");
    let pieces = crate::game::confetti(&session.state().settings, &mut rng);
    if pieces.is_empty() {
        return;
    }
    confetti.set(Rc::new(pieces));
    burst.set(burst.wrapping_add(1));
}

fn build_dispatch(state: &AppState) -> Callback<Intent> {
    let session_handle = state.session.clone();
    let confetti = state.confetti.clone();
    let burst = state.confetti_burst.clone();
    Callback::from(move |intent: Intent| {
        let Some(mut sess) = (*session_handle).clone() else {
            return;
        };
        let name = intent.name();
        let before = sess.view();
        match sess.apply(intent) {
            Ok(effects) => {
                if effects.persist {
                    crate::game::persist(&sess);
                }
                if effects.celebrate {
                    launch_confetti(&confetti, &burst, &sess);
                }
                if sess.view() != before {
                    crate::a11y::set_status(&status_for(&sess));
                }
                session_handle.set(Some(sess));
            }
            Err(err) => log::debug!("{name} ignored: {err}"),
        }
    })
}

fn build_continue_saved(state: &AppState) -> Callback<()> {
    let config = state.config.clone();
    let pending = state.pending.clone();
    let session = state.session.clone();
    let phase = state.phase.clone();
    let confetti = state.confetti.clone();
    let burst = state.confetti_burst.clone();
    Callback::from(move |()| {
        let (Some(cfg), Some(saved)) = ((*config).clone(), (*pending).clone()) else {
            return;
        };
        crate::a11y::apply_theme(saved.settings.dark_mode);
        let resumed = QuizSession::resume(cfg, saved);
        if resumed.celebrates_ending() {
            launch_confetti(&confetti, &burst, &resumed);
        }
        crate::a11y::set_status(&status_for(&resumed));
        session.set(Some(resumed));
        pending.set(None);
        phase.set(Phase::Quest);
    })
}

fn build_start_over(state: &AppState) -> Callback<()> {
    let config = state.config.clone();
    let pending = state.pending.clone();
    let session = state.session.clone();
    let phase = state.phase.clone();
    Callback::from(move |()| {
        let (Some(cfg), Some(saved)) = ((*config).clone(), (*pending).clone()) else {
            return;
        };
        let fresh = QuizSession::resume(cfg, saved.restarted(Utc::now()));
        crate::game::persist(&fresh);
        crate::a11y::set_status(&status_for(&fresh));
        session.set(Some(fresh));
        pending.set(None);
        phase.set(Phase::Quest);
    })
}

fn build_clear_confetti(state: &AppState) -> Callback<()> {
    let confetti = state.confetti.clone();
    Callback::from(move |()| confetti.set(Rc::new(Vec::new())))
}
