//! Mini-game views. Each wraps a core engine and owns the timers it needs.

pub mod catch_hearts;
pub mod maze;
pub mod memory_match;
pub mod sliding_puzzle;

use crate::game::{GalleryImage, GameKind, GameOutcome, GameSpec};
use yew::prelude::*;

pub use catch_hearts::CatchHearts;
pub use maze::MazeGame;
pub use memory_match::MemoryMatchGame;
pub use sliding_puzzle::SlidingPuzzleGame;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub spec: GameSpec,
    /// Seed for the board layout, stable for the session.
    pub seed: u64,
    /// Whether this game was already won earlier in the session.
    #[prop_or_default]
    pub won: bool,
    #[prop_or_default]
    pub image: Option<GalleryImage>,
    #[prop_or_default]
    pub reduced_motion: bool,
    pub on_finish: Callback<GameOutcome>,
}

#[function_component(GameCard)]
pub fn game_card(p: &Props) -> Html {
    let spec = &p.spec;
    let settings = spec.settings.clone();
    let board = match spec.kind {
        GameKind::MemoryMatch => html! {
            <MemoryMatchGame {settings} seed={p.seed} on_finish={p.on_finish.clone()} />
        },
        GameKind::CatchTheHearts => html! {
            <CatchHearts {settings} seed={p.seed} reduced_motion={p.reduced_motion} on_finish={p.on_finish.clone()} />
        },
        GameKind::Maze => html! {
            <MazeGame grid_size={settings.grid_size} seed={p.seed} on_finish={p.on_finish.clone()} />
        },
        GameKind::Puzzle => html! {
            <SlidingPuzzleGame image={p.image.clone()} seed={p.seed} on_finish={p.on_finish.clone()} />
        },
    };
    html! {
        <section class="card game-card" data-game={spec.id.clone()} aria-labelledby={format!("game-{}", spec.id)}>
            <h2 id={format!("game-{}", spec.id)}>{ spec.title.clone() }</h2>
            if !spec.intro.is_empty() {
                <p class="intro">{ spec.intro.clone() }</p>
            }
            if p.won {
                <p class="badge already-won">{ "Already won! Play again or move on whenever you like." }</p>
            }
            { board }
            if !spec.outro.is_empty() {
                <p class="outro">{ spec.outro.clone() }</p>
            }
        </section>
    }
}

/// Emit `outcome` to `on_finish` whenever it first becomes `Some` in a round.
#[hook]
pub(crate) fn use_report_outcome(
    outcome: Option<GameOutcome>,
    round: u32,
    on_finish: &Callback<GameOutcome>,
) {
    let on_finish = on_finish.clone();
    use_effect_with((outcome, round), move |(outcome, _)| {
        if let Some(outcome) = outcome {
            on_finish.emit(*outcome);
        }
        || {}
    });
}
