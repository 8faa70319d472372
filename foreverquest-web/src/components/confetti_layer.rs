use crate::game::ConfettiPiece;
use crate::game::constants::CONFETTI_LIFETIME_MS;
use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

const PALETTE: [&str; crate::game::CONFETTI_COLORS] =
    ["var(--primary,#ff6b9d)", "var(--secondary,#c44569)", "var(--accent,#ffd166)"];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub pieces: Rc<Vec<ConfettiPiece>>,
    /// Changes on every new burst.
    pub burst: u32,
    pub on_done: Callback<()>,
}

fn piece_style(piece: &ConfettiPiece) -> String {
    let color = PALETTE.get(piece.color_index).copied().unwrap_or(PALETTE[0]);
    format!(
        "left:{:.1}%;width:{:.1}px;height:{:.1}px;background:{color};animation-duration:{:.2}s;animation-delay:{:.2}s;transform:rotate({:.0}deg)",
        piece.left_pct,
        piece.width_px,
        piece.height_px,
        piece.duration_secs,
        piece.delay_secs,
        piece.rotation_deg
    )
}

/// Falling confetti overlay, removed after its lifetime.
#[function_component(ConfettiLayer)]
pub fn confetti_layer(p: &Props) -> Html {
    {
        let on_done = p.on_done.clone();
        let active = !p.pieces.is_empty();
        use_effect_with((p.burst, active), move |(_, active)| {
            let timer =
                active.then(|| Timeout::new(CONFETTI_LIFETIME_MS, move || on_done.emit(())));
            move || drop(timer)
        });
    }

    if p.pieces.is_empty() {
        return Html::default();
    }
    html! {
        <div class="confetti-layer" aria-hidden="true">
            { for p.pieces.iter().map(|piece| html! {
                <span class="confetti" style={piece_style(piece)}></span>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_maps_palette_and_geometry() {
        let piece = ConfettiPiece {
            left_pct: 12.5,
            color_index: 2,
            width_px: 10.0,
            height_px: 14.0,
            duration_secs: 3.0,
            delay_secs: 0.5,
            rotation_deg: 90.0,
        };
        let style = piece_style(&piece);
        assert!(style.starts_with("left:12.5%"));
        assert!(style.contains("#ffd166"));
        assert!(style.contains("rotate(90deg)"));
    }
}
