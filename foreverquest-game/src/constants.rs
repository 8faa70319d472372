//! Centralized tuning constants for Foreverquest logic.
//!
//! Values that the quest document does not override live here so that
//! behavior only changes through reviewed code.

// Persistence ---------------------------------------------------------------
/// Storage key holding the serialized session record.
pub const STATE_KEY: &str = "foreverquest.session.v1";

// Questions -----------------------------------------------------------------
/// Longest accepted short-text answer, in characters.
pub const SHORT_TEXT_MAX_CHARS: usize = 100;

// Memory match --------------------------------------------------------------
/// Delay before a mismatched pair turns face-down again.
pub const MISMATCH_FLIP_BACK_MS: u32 = 1_000;

// Catch the hearts ----------------------------------------------------------
pub(crate) const DEFAULT_TARGET_SCORE: u32 = 10;
pub(crate) const DEFAULT_DURATION_SECONDS: u32 = 30;
pub(crate) const DEFAULT_SPAWN_INTERVAL_MS: u32 = 800;
pub(crate) const DEFAULT_HEART_LIFETIME_MS: u32 = 3_000;
/// Countdown period.
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub(crate) const HEART_SIZE_MIN_PX: f32 = 24.0;
pub(crate) const HEART_SIZE_SPREAD_PX: f32 = 12.0;
pub(crate) const HEART_FALL_MIN_SECS: f32 = 2.5;
pub(crate) const HEART_FALL_SPREAD_SECS: f32 = 2.0;

// Maze ----------------------------------------------------------------------
pub(crate) const DEFAULT_MAZE_SIZE: usize = 6;
pub(crate) const MIN_MAZE_SIZE: usize = 2;

// Sliding puzzle ------------------------------------------------------------
/// Side length of the sliding puzzle board.
pub const PUZZLE_SIZE: usize = 3;

// Celebration ---------------------------------------------------------------
pub const CONFETTI_PIECES: usize = 70;
/// How long confetti stays on screen before removal.
pub const CONFETTI_LIFETIME_MS: u32 = 5_000;
