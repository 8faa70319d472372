//! Mini-game engines.
//!
//! Each engine is a self-contained state machine that produces one
//! [`GameOutcome`] when it finishes. Timers and animation belong to the
//! presentation layer; engines only expose the transitions those timers drive.

pub mod catch;
pub mod maze;
pub mod memory;
pub mod puzzle;

use rand::Rng;

use crate::config::{GameKind, GameSpec};
use crate::state::GameOutcome;

pub use catch::{CatchTheHearts, Heart, RoundState};
pub use maze::{Direction, Maze, MazeRun, MoveResult, Walls};
pub use memory::{Card, CardFace, Flip, MemoryMatch};
pub use puzzle::{BLANK_PIECE, SlidingPuzzle};

/// Common surface of every mini-game engine.
pub trait MiniGame {
    /// Whether the game has been won.
    fn is_won(&self) -> bool;

    /// The final outcome, once the game has finished.
    fn outcome(&self) -> Option<GameOutcome>;
}

/// A freshly set-up engine for one configured game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameBoard {
    Memory(MemoryMatch),
    Catch(CatchTheHearts),
    Maze(MazeRun),
    Puzzle(SlidingPuzzle),
}

impl GameBoard {
    pub fn new<R: Rng + ?Sized>(spec: &GameSpec, rng: &mut R) -> Self {
        let settings = &spec.settings;
        match spec.kind {
            GameKind::MemoryMatch => Self::Memory(MemoryMatch::new(settings, rng)),
            GameKind::CatchTheHearts => Self::Catch(CatchTheHearts::new(settings)),
            GameKind::Maze => Self::Maze(MazeRun::new(settings.grid_size, rng)),
            GameKind::Puzzle => Self::Puzzle(SlidingPuzzle::shuffled(rng)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GameKind {
        match self {
            Self::Memory(_) => GameKind::MemoryMatch,
            Self::Catch(_) => GameKind::CatchTheHearts,
            Self::Maze(_) => GameKind::Maze,
            Self::Puzzle(_) => GameKind::Puzzle,
        }
    }
}

impl MiniGame for GameBoard {
    fn is_won(&self) -> bool {
        match self {
            Self::Memory(game) => game.is_won(),
            Self::Catch(game) => game.is_won(),
            Self::Maze(game) => game.is_won(),
            Self::Puzzle(game) => game.is_won(),
        }
    }

    fn outcome(&self) -> Option<GameOutcome> {
        match self {
            Self::Memory(game) => game.outcome(),
            Self::Catch(game) => game.outcome(),
            Self::Maze(game) => game.outcome(),
            Self::Puzzle(game) => game.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuestConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn boards_match_configured_kinds() {
        let config = QuestConfig::bundled().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for spec in &config.games {
            let board = GameBoard::new(spec, &mut rng);
            assert_eq!(board.kind(), spec.kind);
            assert!(!board.is_won(), "{} starts unwon", spec.id);
        }
    }
}
