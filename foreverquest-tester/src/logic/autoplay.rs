//! Automated play-throughs of a quest.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use foreverquest_game::games::MoveResult;
use foreverquest_game::{
    ConfigError, ConfigLoader, GameBoard, GameOutcome, Intent, MiniGame, PathScores, QuestConfig,
    QuizEngine, SessionStorage, Settings, Step, View,
};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;

use super::policy::AnswerStrategy;

/// Quest document read from disk.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum FileConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FileConfig {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigLoader for FileConfig {
    type Error = FileConfigError;

    fn load_config(&self) -> Result<QuestConfig, Self::Error> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| FileConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(QuestConfig::from_json(&text)?)
    }
}

/// Outcome of one automated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub strategy: String,
    pub ending: Option<String>,
    pub path_scores: PathScores,
    pub intents: usize,
    pub games_won: usize,
    pub games_skipped: usize,
    pub completed: bool,
}

/// Session start time that makes the session's game seed equal `seed`.
#[must_use]
pub fn start_time_for(seed: u64) -> DateTime<Utc> {
    // Keep within chrono's representable range.
    let millis = i64::try_from(seed % 253_402_300_799_000).unwrap_or_default();
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Drive a freshly set-up game to its end the way a player who knows the
/// answer would. Returns `None` when the board cannot be won.
pub fn finish_game<R: Rng + ?Sized>(board: &mut GameBoard, rng: &mut R) -> Option<GameOutcome> {
    match board {
        GameBoard::Memory(game) => {
            let cards: Vec<String> = game.cards().iter().map(|c| c.token.clone()).collect();
            let mut used = vec![false; cards.len()];
            for first in 0..cards.len() {
                if used[first] {
                    continue;
                }
                let partner = (first + 1..cards.len()).find(|&j| !used[j] && cards[j] == cards[first]);
                if let Some(second) = partner {
                    used[first] = true;
                    used[second] = true;
                    game.select(first);
                    game.select(second);
                }
            }
            game.outcome()
        }
        GameBoard::Catch(game) => {
            while game.is_running() {
                let heart = game.spawn(rng)?;
                if let Some(outcome) = game.catch(heart.id) {
                    return Some(outcome);
                }
            }
            game.outcome()
        }
        GameBoard::Maze(run) => {
            for dir in run.maze().solve() {
                if let MoveResult::Reached(outcome) = run.try_move(dir) {
                    return Some(outcome);
                }
            }
            run.outcome()
        }
        GameBoard::Puzzle(puzzle) => {
            for slot in puzzle.solve()? {
                puzzle.click(slot);
            }
            puzzle.outcome()
        }
    }
}

/// Play a whole quest with one answering strategy, saving as a browser would.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, an intent the
/// player should be allowed to make is rejected, or the run does not finish.
pub fn play_through<L, S>(
    engine: &QuizEngine<L, S>,
    strategy: AnswerStrategy,
    seed: u64,
) -> Result<RunSummary>
where
    L: ConfigLoader,
    S: SessionStorage,
    S::Error: Into<anyhow::Error>,
{
    let now = start_time_for(seed);
    let mut session = engine
        .start(Settings::default(), now)
        .context("failed to start session")?;
    let mut policy = strategy.create_policy(seed);
    let mut rng = foreverquest_game::seed::named_rng(seed, "autoplay");
    let budget = session.sequencer().len() * 16 + 8;
    let mut summary = RunSummary {
        seed,
        strategy: strategy.label(),
        ending: None,
        path_scores: PathScores::default(),
        intents: 0,
        games_won: 0,
        games_skipped: 0,
        completed: false,
    };

    while summary.intents < budget {
        let intents = match session.view() {
            View::Confirmation => break,
            View::Ending => vec![Intent::Confirm],
            View::Step(index) => {
                let step = session
                    .current_step()
                    .cloned()
                    .with_context(|| format!("no step at index {index}"))?;
                match &step {
                    Step::Interlude(_) | Step::Ending => vec![Intent::Next],
                    Step::Question(question) => {
                        log::trace!("{} answers {}", policy.name(), question.id);
                        for intent in policy.answer(question) {
                            engine.dispatch(&mut session, intent, now)?;
                            summary.intents += 1;
                        }
                        if step.is_complete(session.state()) {
                            vec![Intent::Next]
                        } else {
                            vec![Intent::Skip]
                        }
                    }
                    Step::Game(spec) => {
                        let mut board = GameBoard::new(spec, &mut session.game_rng(&spec.id));
                        match finish_game(&mut board, &mut rng) {
                            Some(outcome) if outcome.won => {
                                summary.games_won += 1;
                                vec![
                                    Intent::GameFinished {
                                        game: spec.id.clone(),
                                        outcome,
                                    },
                                    Intent::Next,
                                ]
                            }
                            _ => {
                                summary.games_skipped += 1;
                                vec![Intent::Skip]
                            }
                        }
                    }
                }
            }
        };
        for intent in intents {
            let name = intent.name();
            engine
                .dispatch(&mut session, intent, now)
                .with_context(|| format!("{name} rejected at step {}", session.state().current_index))?;
            summary.intents += 1;
        }
    }

    let state = session.state();
    summary.completed = state.is_completed();
    summary.ending.clone_from(&state.ending);
    summary.path_scores = state.path_scores;
    anyhow::ensure!(
        summary.completed,
        "run did not finish within {budget} intents"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foreverquest_game::{BundledConfig, MemoryStorage, PathTag};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn favoring_a_path_reaches_its_ending() {
        let engine = QuizEngine::new(BundledConfig, MemoryStorage::default());
        for tag in PathTag::ALL {
            let summary = play_through(&engine, AnswerStrategy::Favor(tag), 11).unwrap();
            assert_eq!(summary.ending, Some(tag.ending_id()), "{tag}");
        }
    }

    #[test]
    fn skipping_everything_lands_on_default_ending() {
        let engine = QuizEngine::new(BundledConfig, MemoryStorage::default());
        let summary = play_through(&engine, AnswerStrategy::SkipAll, 3).unwrap();
        assert_eq!(summary.ending, Some(PathTag::DEFAULT.ending_id()));
        assert_eq!(summary.path_scores, PathScores::default());
    }

    #[test]
    fn every_bundled_game_can_be_finished_except_unsolvable_puzzles() {
        let config = QuestConfig::bundled().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for seed in 0..10 {
            for spec in &config.games {
                let mut board = GameBoard::new(spec, &mut ChaCha20Rng::seed_from_u64(seed));
                let outcome = finish_game(&mut board, &mut rng);
                match &board {
                    GameBoard::Puzzle(puzzle) if !puzzle.is_solvable() => assert!(outcome.is_none()),
                    GameBoard::Puzzle(puzzle) if puzzle.is_solved() && puzzle.moves() == 0 => {}
                    _ => assert!(outcome.is_some_and(|o| o.won), "{} seed {seed}", spec.id),
                }
            }
        }
    }

    #[test]
    fn start_time_maps_back_to_seed() {
        let t = start_time_for(1_700_000_000_000);
        assert_eq!(foreverquest_game::session_seed(t), 1_700_000_000_000);
    }
}
