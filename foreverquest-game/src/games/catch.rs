//! Catch the hearts: a timed arcade round driven by two periodic schedules.
//!
//! The presentation layer owns the timers. It calls [`CatchTheHearts::tick`]
//! once per second and [`CatchTheHearts::spawn`] every spawn interval, and
//! drops both schedules when either call reports the round has ended.
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::MiniGame;
use crate::config::GameSettings;
use crate::constants::{
    HEART_FALL_MIN_SECS, HEART_FALL_SPREAD_SECS, HEART_SIZE_MIN_PX, HEART_SIZE_SPREAD_PX,
};
use crate::state::GameOutcome;

/// A clickable heart currently on the playfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    /// Horizontal position as a share of the usable width, `0.0..1.0`.
    pub left: f32,
    pub size_px: f32,
    pub fall_secs: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Ended(GameOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchTheHearts {
    target_score: u32,
    duration_seconds: u32,
    score: u32,
    time_left: u32,
    hearts: Vec<Heart>,
    next_id: u32,
    state: RoundState,
}

impl CatchTheHearts {
    #[must_use]
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            target_score: settings.target_score,
            duration_seconds: settings.duration_seconds,
            score: 0,
            time_left: settings.duration_seconds,
            hearts: Vec::new(),
            next_id: 0,
            state: RoundState::Running,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn target_score(&self) -> u32 {
        self.target_score
    }

    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, RoundState::Running)
    }

    /// Countdown tick. Returns the outcome when this tick ends the round.
    pub fn tick(&mut self) -> Option<GameOutcome> {
        if !self.is_running() {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end()
        } else {
            None
        }
    }

    /// Spawner tick: place a new heart while time remains.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Heart> {
        if !self.is_running() || self.time_left == 0 {
            return None;
        }
        let heart = Heart {
            id: self.next_id,
            left: rng.gen_range(0.0..1.0),
            size_px: HEART_SIZE_MIN_PX + rng.gen_range(0.0..HEART_SIZE_SPREAD_PX),
            fall_secs: HEART_FALL_MIN_SECS + rng.gen_range(0.0..HEART_FALL_SPREAD_SECS),
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.hearts.push(heart.clone());
        Some(heart)
    }

    /// Catch a heart. Returns the outcome when this catch reaches the target.
    ///
    /// Unknown or already removed hearts are ignored.
    pub fn catch(&mut self, id: u32) -> Option<GameOutcome> {
        if !self.is_running() {
            return None;
        }
        let pos = self.hearts.iter().position(|h| h.id == id)?;
        self.hearts.remove(pos);
        self.score += 1;
        if self.score >= self.target_score {
            self.end()
        } else {
            None
        }
    }

    /// Remove a heart whose lifetime ran out.
    pub fn expire(&mut self, id: u32) {
        self.hearts.retain(|h| h.id != id);
    }

    /// End the round. Only the first call produces an outcome; the remaining
    /// time stays at whatever it was when the round ended.
    pub fn end(&mut self) -> Option<GameOutcome> {
        if !self.is_running() {
            return None;
        }
        self.hearts.clear();
        let outcome = GameOutcome::scored(self.score, self.score >= self.target_score);
        self.state = RoundState::Ended(outcome);
        log::debug!(
            "catch round ended: score {}/{} with {}s left",
            self.score,
            self.target_score,
            self.time_left
        );
        Some(outcome)
    }

    /// Start a fresh round with the same settings.
    pub fn restart(&mut self) {
        self.score = 0;
        self.time_left = self.duration_seconds;
        self.hearts.clear();
        self.state = RoundState::Running;
    }
}

impl MiniGame for CatchTheHearts {
    fn is_won(&self) -> bool {
        matches!(self.state, RoundState::Ended(outcome) if outcome.won)
    }

    fn outcome(&self) -> Option<GameOutcome> {
        match self.state {
            RoundState::Ended(outcome) => Some(outcome),
            RoundState::Running => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn settings(target: u32, duration: u32) -> GameSettings {
        GameSettings {
            target_score: target,
            duration_seconds: duration,
            ..GameSettings::default()
        }
    }

    #[test]
    fn reaching_target_ends_immediately_and_freezes_timer() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut game = CatchTheHearts::new(&settings(2, 10));
        game.tick();
        game.tick();
        let a = game.spawn(&mut rng).unwrap();
        let b = game.spawn(&mut rng).unwrap();
        assert!(game.catch(a.id).is_none());
        let outcome = game.catch(b.id).unwrap();

        assert_eq!(outcome, GameOutcome::scored(2, true));
        assert_eq!(game.time_left(), 8);
        assert!(game.tick().is_none());
        assert_eq!(game.time_left(), 8);
        assert!(game.spawn(&mut rng).is_none());
        assert!(game.end().is_none());
        assert!(game.is_won());
    }

    #[test]
    fn timeout_ends_with_loss_below_target() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut game = CatchTheHearts::new(&settings(5, 3));
        let heart = game.spawn(&mut rng).unwrap();
        game.catch(heart.id);
        assert!(game.tick().is_none());
        assert!(game.tick().is_none());
        let outcome = game.tick().unwrap();
        assert_eq!(outcome, GameOutcome::scored(1, false));
        assert!(game.hearts().is_empty());
        assert!(!game.is_won());
    }

    #[test]
    fn expired_hearts_cannot_be_caught() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut game = CatchTheHearts::new(&settings(5, 30));
        let heart = game.spawn(&mut rng).unwrap();
        game.expire(heart.id);
        assert!(game.catch(heart.id).is_none());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn spawned_hearts_stay_within_visual_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let mut game = CatchTheHearts::new(&settings(100, 30));
        for _ in 0..50 {
            let heart = game.spawn(&mut rng).unwrap();
            assert!((0.0..1.0).contains(&heart.left));
            assert!((24.0..36.0).contains(&heart.size_px));
            assert!((2.5..4.5).contains(&heart.fall_secs));
        }
        assert_eq!(game.hearts().len(), 50);
    }

    #[test]
    fn restart_allows_a_second_round() {
        let mut game = CatchTheHearts::new(&settings(1, 1));
        assert!(game.tick().is_some());
        game.restart();
        assert!(game.is_running());
        assert_eq!(game.time_left(), 1);
        assert_eq!(game.score(), 0);
    }
}
