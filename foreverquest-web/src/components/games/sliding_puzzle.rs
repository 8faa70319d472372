use super::use_report_outcome;
use crate::game::constants::PUZZLE_SIZE;
use crate::game::games::{BLANK_PIECE, SlidingPuzzle};
use crate::game::{GalleryImage, GameOutcome, MiniGame};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub image: Option<GalleryImage>,
    pub seed: u64,
    pub on_finish: Callback<GameOutcome>,
}

/// Background offset that shows `piece`'s part of the picture.
#[allow(clippy::cast_precision_loss)]
fn tile_style(image: &GalleryImage, piece: usize) -> String {
    let (row, col) = SlidingPuzzle::coords(piece);
    let step = 100.0 / (PUZZLE_SIZE as f32 - 1.0);
    format!(
        "background-image:url('{}');background-size:{}% {}%;background-position:{:.1}% {:.1}%",
        image.url,
        PUZZLE_SIZE * 100,
        PUZZLE_SIZE * 100,
        col as f32 * step,
        row as f32 * step
    )
}

#[function_component(SlidingPuzzleGame)]
pub fn sliding_puzzle_game(p: &Props) -> Html {
    let puzzle = {
        let seed = p.seed;
        use_mut_ref(move || SlidingPuzzle::shuffled(&mut ChaCha20Rng::seed_from_u64(seed)))
    };
    let outcome = use_state(|| None::<GameOutcome>);
    let force = use_force_update();
    use_report_outcome(*outcome, 0, &p.on_finish);

    let on_click = {
        let puzzle = puzzle.clone();
        let outcome = outcome.clone();
        Callback::from(move |slot: usize| {
            let solved = puzzle.borrow_mut().click(slot);
            if solved.is_some() {
                outcome.set(solved);
            }
            force.force_update();
        })
    };

    let board = puzzle.borrow();
    html! {
        <div class="puzzle-game">
            <p class="game-stats">{ format!("Moves: {}", board.moves()) }</p>
            <div class="puzzle-grid" style={format!("grid-template-columns:repeat({PUZZLE_SIZE},1fr)")}>
                { for board.pieces().iter().enumerate().map(|(slot, &piece)| {
                    if piece == BLANK_PIECE && !board.is_won() {
                        return html! { <div class="puzzle-tile blank" aria-hidden="true"></div> };
                    }
                    let movable = board.is_adjacent_to_blank(slot) && !board.is_won();
                    let style = p.image.as_ref().map(|img| tile_style(img, piece));
                    html! {
                        <button
                            class={classes!("puzzle-tile", movable.then_some("movable"))}
                            aria-label={format!("Piece {}", piece + 1)}
                            {style}
                            onclick={on_click.reform(move |_: MouseEvent| slot)}>
                            if p.image.is_none() {
                                { (piece + 1).to_string() }
                            }
                        </button>
                    }
                }) }
            </div>
            if let Some(end) = *outcome {
                <p class="game-result" role="status">
                    { format!("Picture perfect! Solved in {} moves.", end.moves.unwrap_or_default()) }
                </p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_show_their_share_of_the_picture() {
        let image = GalleryImage {
            id: "img".into(),
            url: "us.jpg".into(),
            alt: String::new(),
            caption: String::new(),
        };
        assert!(tile_style(&image, 0).ends_with("background-position:0.0% 0.0%"));
        assert!(tile_style(&image, 5).ends_with("background-position:100.0% 50.0%"));
        assert!(tile_style(&image, 7).contains("300% 300%"));
    }
}
