use super::use_report_outcome;
use crate::game::constants::MISMATCH_FLIP_BACK_MS;
use crate::game::games::{CardFace, Flip, MemoryMatch};
use crate::game::{GameOutcome, GameSettings, MiniGame};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub settings: GameSettings,
    pub seed: u64,
    pub on_finish: Callback<GameOutcome>,
}

#[function_component(MemoryMatchGame)]
pub fn memory_match_game(p: &Props) -> Html {
    let game = {
        let settings = p.settings.clone();
        let seed = p.seed;
        use_mut_ref(move || MemoryMatch::new(&settings, &mut ChaCha20Rng::seed_from_u64(seed)))
    };
    let flip_back = use_mut_ref(|| None::<Timeout>);
    let outcome = use_state(|| None::<GameOutcome>);
    let force = use_force_update();
    use_report_outcome(*outcome, 0, &p.on_finish);

    let select = {
        let game = game.clone();
        let flip_back = flip_back.clone();
        let outcome = outcome.clone();
        let force = force.clone();
        Callback::from(move |index: usize| {
            let flip = game.borrow_mut().select(index);
            match flip {
                Flip::Ignored => return,
                Flip::Revealed | Flip::Matched { won: false } => {}
                Flip::Matched { won: true } => outcome.set(game.borrow().outcome()),
                Flip::Mismatched => {
                    let game = game.clone();
                    let force = force.clone();
                    *flip_back.borrow_mut() = Some(Timeout::new(MISMATCH_FLIP_BACK_MS, move || {
                        game.borrow_mut().settle();
                        force.force_update();
                    }));
                }
            }
            force.force_update();
        })
    };

    let board = game.borrow();
    let status = format!("Pairs: {}/{}", board.matched_pairs(), board.total_pairs());
    html! {
        <div class="memory-game">
            <p class="game-stats">{ status }</p>
            <div class={classes!("memory-grid", board.is_locked().then_some("locked"))}>
                { for board.cards().iter().enumerate().map(|(index, card)| {
                    let onclick = select.reform(move |_: MouseEvent| index);
                    let (face_class, label) = match card.face {
                        CardFace::Down => ("down", String::from("💝")),
                        CardFace::Up => ("up", card.token.clone()),
                        CardFace::Matched => ("matched", card.token.clone()),
                    };
                    html! {
                        <button
                            class={classes!("memory-card", face_class)}
                            aria-label={if card.face == CardFace::Down { format!("Card {}", index + 1) } else { card.token.clone() }}
                            disabled={card.face == CardFace::Matched}
                            {onclick}>
                            { label }
                        </button>
                    }
                }) }
            </div>
            if board.is_won() {
                <p class="game-result" role="status">{ "You found all the pairs! 💕" }</p>
            }
        </div>
    }
}
