use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::game::{QuestConfig, QuizSession, Resume, Settings, WebConfigError};
use chrono::{DateTime, Utc};
use yew::prelude::*;

#[derive(Clone)]
struct BootstrapHandles {
    phase: UseStateHandle<Phase>,
    config: UseStateHandle<Option<QuestConfig>>,
    session: UseStateHandle<Option<QuizSession>>,
    pending: UseStateHandle<Option<crate::game::SessionState>>,
    load_error: UseStateHandle<Option<AttrValue>>,
}

fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        phase: app_state.phase.clone(),
        config: app_state.config.clone(),
        session: app_state.session.clone(),
        pending: app_state.pending.clone(),
        load_error: app_state.load_error.clone(),
    }
}

/// Settle the app after the quest document request finishes.
///
/// Saved progress goes to the resume prompt; otherwise a fresh session starts
/// with the environment's settings and is saved right away.
fn bootstrap_settle(
    handles: &BootstrapHandles,
    loaded: Result<QuestConfig, WebConfigError>,
    resume: Resume,
    settings: Settings,
    now: DateTime<Utc>,
) {
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            crate::dom::console_error(&format!("Failed to load quest: {err}"));
            handles.load_error.set(Some(AttrValue::from(err.to_string())));
            handles.phase.set(Phase::Failed);
            return;
        }
    };

    let phase = Phase::after_boot(&resume);
    match resume {
        Resume::Resumable(saved) => {
            log::info!("Found saved progress at step {}", saved.current_index);
            handles.pending.set(Some(saved));
        }
        Resume::Fresh => {
            crate::a11y::apply_theme(settings.dark_mode);
            let session = QuizSession::start(config.clone(), settings, now);
            crate::game::persist(&session);
            handles.session.set(Some(session));
        }
    }
    handles.config.set(Some(config));
    handles.phase.set(phase);
}

#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let handles = handles_from_state(app_state);

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = crate::game::fetch_config(crate::game::CONFIG_URL).await;
            let resume = if loaded.is_ok() {
                crate::game::stored_resume()
            } else {
                Resume::Fresh
            };
            bootstrap_settle(
                &handles,
                loaded,
                resume,
                crate::a11y::current_settings(),
                Utc::now(),
            );
        });
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ConfigError, SessionState};
    use chrono::TimeZone;
    use futures::executor::block_on;
    use std::rc::Rc;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        scenario: u8,
        seen: Rc<std::cell::RefCell<Option<Phase>>>,
    }

    #[function_component(BootstrapHarness)]
    fn bootstrap_harness(props: &HarnessProps) -> Html {
        let app_state = crate::app::state::use_app_state();
        let handles = handles_from_state(&app_state);
        let initialized = use_state(|| false);
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap();
        if !*initialized {
            initialized.set(true);
            let loaded = QuestConfig::bundled().map_err(WebConfigError::from);
            let (loaded, resume) = match props.scenario {
                0 => (loaded, Resume::Fresh),
                1 => {
                    let mut saved = SessionState::fresh(Settings::default(), now);
                    saved.current_index = 3;
                    (loaded, Resume::Resumable(saved))
                }
                _ => (
                    Err(WebConfigError::Config(ConfigError::EmptySequence)),
                    Resume::Fresh,
                ),
            };
            bootstrap_settle(&handles, loaded, resume, Settings::default(), now);
        }
        *props.seen.borrow_mut() = Some(*app_state.phase);
        Html::default()
    }

    fn settle(scenario: u8) -> Option<Phase> {
        let seen = Rc::new(std::cell::RefCell::new(None));
        let props = HarnessProps {
            scenario,
            seen: seen.clone(),
        };
        let _ = block_on(LocalServerRenderer::<BootstrapHarness>::with_props(props).render());
        let phase = *seen.borrow();
        phase
    }

    #[test]
    fn bootstrap_settles_for_each_load_result() {
        for scenario in 0..3 {
            assert!(settle(scenario).is_some(), "scenario {scenario} rendered");
        }
    }
}
