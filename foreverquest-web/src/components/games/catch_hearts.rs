use super::use_report_outcome;
use crate::game::constants::COUNTDOWN_TICK_MS;
use crate::game::games::{CatchTheHearts, Heart, RoundState};
use crate::game::{GameOutcome, GameSettings};
use gloo::timers::callback::{Interval, Timeout};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub settings: GameSettings,
    pub seed: u64,
    #[prop_or_default]
    pub reduced_motion: bool,
    pub on_finish: Callback<GameOutcome>,
}

fn heart_style(heart: &Heart, reduced_motion: bool) -> String {
    let left = heart.left * 90.0;
    if reduced_motion {
        format!("left:{left:.1}%;font-size:{:.0}px;animation:none", heart.size_px)
    } else {
        format!(
            "left:{left:.1}%;font-size:{:.0}px;animation-duration:{:.2}s",
            heart.size_px, heart.fall_secs
        )
    }
}

/// Countdown and spawner schedules for one running round.
fn start_round(
    game: &Rc<RefCell<CatchTheHearts>>,
    rng: &Rc<RefCell<ChaCha20Rng>>,
    settings: &GameSettings,
    outcome: &UseStateHandle<Option<GameOutcome>>,
    force: &UseForceUpdateHandle,
) -> (Interval, Interval) {
    let countdown = {
        let game = game.clone();
        let outcome = outcome.clone();
        let force = force.clone();
        Interval::new(COUNTDOWN_TICK_MS, move || {
            let ended = game.borrow_mut().tick();
            if ended.is_some() {
                outcome.set(ended);
            }
            force.force_update();
        })
    };
    let spawner = {
        let game = game.clone();
        let rng = rng.clone();
        let force = force.clone();
        let lifetime = settings.heart_lifetime_ms;
        Interval::new(settings.spawn_interval_ms, move || {
            let spawned = game.borrow_mut().spawn(&mut *rng.borrow_mut());
            let Some(heart) = spawned else {
                return;
            };
            let game = game.clone();
            let expire_force = force.clone();
            Timeout::new(lifetime, move || {
                game.borrow_mut().expire(heart.id);
                expire_force.force_update();
            })
            .forget();
            force.force_update();
        })
    };
    (countdown, spawner)
}

#[function_component(CatchHearts)]
pub fn catch_hearts(p: &Props) -> Html {
    let game = {
        let settings = p.settings.clone();
        use_mut_ref(move || CatchTheHearts::new(&settings))
    };
    let rng = {
        let seed = p.seed;
        use_mut_ref(move || ChaCha20Rng::seed_from_u64(seed))
    };
    let round = use_state(|| 0_u32);
    let outcome = use_state(|| None::<GameOutcome>);
    let force = use_force_update();
    use_report_outcome(*outcome, *round, &p.on_finish);

    {
        let game = game.clone();
        let rng = rng.clone();
        let settings = p.settings.clone();
        let outcome_handle = outcome.clone();
        let force = force.clone();
        let ended = outcome.is_some();
        use_effect_with((*round, ended), move |(_, ended)| {
            let timers =
                (!*ended).then(|| start_round(&game, &rng, &settings, &outcome_handle, &force));
            move || drop(timers)
        });
    }

    let on_catch = {
        let game = game.clone();
        let outcome = outcome.clone();
        let force = force.clone();
        Callback::from(move |id: u32| {
            let ended = game.borrow_mut().catch(id);
            if ended.is_some() {
                outcome.set(ended);
            }
            force.force_update();
        })
    };

    let on_retry = {
        let game = game.clone();
        let outcome = outcome.clone();
        let round = round.clone();
        Callback::from(move |_: MouseEvent| {
            game.borrow_mut().restart();
            outcome.set(None);
            round.set(round.wrapping_add(1));
        })
    };

    let board = game.borrow();
    let stats = format!(
        "Score: {}/{} · Time: {}s",
        board.score(),
        board.target_score(),
        board.time_left()
    );
    let result = match board.state() {
        RoundState::Running => Html::default(),
        RoundState::Ended(end) if end.won => html! {
            <p class="game-result" role="status">
                { format!("You caught {} hearts! 💖", end.score.unwrap_or_default()) }
            </p>
        },
        RoundState::Ended(end) => html! {
            <div class="game-result" role="status">
                <p>{ format!("Time's up! You caught {} of {}.", end.score.unwrap_or_default(), board.target_score()) }</p>
                <button class="btn btn-secondary" onclick={on_retry}>{ "Try Again" }</button>
            </div>
        },
    };
    html! {
        <div class="catch-game">
            <p class="game-stats" aria-live="polite">{ stats }</p>
            <div class="catch-field">
                { for board.hearts().iter().map(|heart| {
                    let id = heart.id;
                    html! {
                        <button
                            key={id}
                            class="falling-heart"
                            style={heart_style(heart, p.reduced_motion)}
                            aria-label="Catch heart"
                            onclick={on_catch.reform(move |_: MouseEvent| id)}>
                            { "❤️" }
                        </button>
                    }
                }) }
            </div>
            { result }
        </div>
    }
}
