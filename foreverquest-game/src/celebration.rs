//! Confetti burst geometry.
use rand::Rng;

use crate::constants::CONFETTI_PIECES;
use crate::state::Settings;

/// Palette slots (primary, secondary, accent) the presentation layer maps to colors.
pub const CONFETTI_COLORS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal start as a percentage of the viewport width.
    pub left_pct: f32,
    pub color_index: usize,
    pub width_px: f32,
    pub height_px: f32,
    pub duration_secs: f32,
    pub delay_secs: f32,
    pub rotation_deg: f32,
}

/// Generate one burst. Empty when the session asked for reduced motion.
pub fn confetti<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Vec<ConfettiPiece> {
    if settings.reduced_motion {
        return Vec::new();
    }
    (0..CONFETTI_PIECES)
        .map(|_| ConfettiPiece {
            left_pct: rng.gen_range(0.0..100.0),
            color_index: rng.gen_range(0..CONFETTI_COLORS),
            width_px: rng.gen_range(8.0..14.0),
            height_px: rng.gen_range(12.0..20.0),
            duration_secs: rng.gen_range(2.5..4.5),
            delay_secs: rng.gen_range(0.0..2.0),
            rotation_deg: rng.gen_range(0.0..360.0),
        })
        .collect()
}
