use super::use_report_outcome;
use crate::game::GameOutcome;
use crate::game::games::{Direction, MazeRun, MoveResult};
use gloo::events::{EventListener, EventListenerOptions};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub grid_size: usize,
    pub seed: u64,
    pub on_finish: Callback<GameOutcome>,
}

fn cell_classes(run: &MazeRun, x: usize, y: usize) -> Classes {
    let walls = run.maze().walls(x, y).unwrap_or_default();
    classes!(
        "maze-cell",
        walls.top.then_some("wall-top"),
        walls.right.then_some("wall-right"),
        walls.bottom.then_some("wall-bottom"),
        walls.left.then_some("wall-left"),
    )
}

#[function_component(MazeGame)]
pub fn maze_game(p: &Props) -> Html {
    let run = {
        let size = p.grid_size;
        let seed = p.seed;
        use_mut_ref(move || MazeRun::new(size, &mut ChaCha20Rng::seed_from_u64(seed)))
    };
    let outcome = use_state(|| None::<GameOutcome>);
    let force = use_force_update();
    use_report_outcome(*outcome, 0, &p.on_finish);

    let on_move = {
        let run = run.clone();
        let outcome = outcome.clone();
        let force = force.clone();
        Callback::from(move |dir: Direction| match run.borrow_mut().try_move(dir) {
            MoveResult::Moved => force.force_update(),
            MoveResult::Reached(end) => {
                outcome.set(Some(end));
                force.force_update();
            }
            MoveResult::Blocked | MoveResult::Finished => {}
        })
    };

    {
        let on_move = on_move.clone();
        use_effect_with((), move |()| {
            let listener = crate::dom::window().map(|win| {
                let options = EventListenerOptions::enable_prevent_default();
                EventListener::new_with_options(&win, "keydown", options, move |event| {
                    let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                        return;
                    };
                    if let Some(dir) = Direction::from_key(&key.key()) {
                        event.prevent_default();
                        on_move.emit(dir);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let state = run.borrow();
    let size = state.maze().size();
    let player = state.player();
    let goal = state.maze().goal();
    let button = |label: &'static str, aria: &'static str, dir: Direction| {
        html! {
            <button class="btn maze-control" aria-label={aria} onclick={on_move.reform(move |_: MouseEvent| dir)}>
                { label }
            </button>
        }
    };
    html! {
        <div class="maze-game">
            <p class="game-stats">{ format!("Steps: {}", state.steps()) }</p>
            <div class="maze-grid" role="img" aria-label="Maze"
                style={format!("grid-template-columns:repeat({size},1fr)")}>
                { for (0..size).flat_map(|y| (0..size).map(move |x| (x, y))).map(|(x, y)| html! {
                    <div class={cell_classes(&state, x, y)}>
                        if (x, y) == player {
                            <span class="maze-player">{ "🧑" }</span>
                        } else if (x, y) == goal {
                            <span class="maze-goal">{ "💖" }</span>
                        }
                    </div>
                }) }
            </div>
            <div class="maze-controls">
                { button("↑", "Move up", Direction::North) }
                <div class="maze-controls-row">
                    { button("←", "Move left", Direction::West) }
                    { button("→", "Move right", Direction::East) }
                </div>
                { button("↓", "Move down", Direction::South) }
            </div>
            if let Some(end) = *outcome {
                <p class="game-result" role="status">
                    { format!("You found your way to me! 💖 ({} steps)", end.steps.unwrap_or_default()) }
                </p>
            }
        </div>
    }
}
