//! Scenario catalog for the logic tester.

use anyhow::{Context, Result, anyhow, ensure};
use foreverquest_game::games::{CatchTheHearts, Flip, Maze, MemoryMatch, SlidingPuzzle};
use foreverquest_game::{
    GameKind, Intent, MemoryStorage, PathTag, QuestConfig, QuizEngine, Resume, SessionStorage,
    Settings, View, derive_game_seed, load_resumable,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::logic::autoplay::start_time_for;
use crate::logic::{AnswerStrategy, play_through};

/// Context handed to every scenario check.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx<'a> {
    pub config: &'a QuestConfig,
    pub seed: u64,
}

pub type ScenarioCheck = fn(&ScenarioCtx<'_>) -> Result<String>;

#[derive(Clone)]
pub struct TestScenario {
    /// Command-line key.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub check: ScenarioCheck,
}

/// Loader over a config the tester already holds.
#[derive(Clone, Copy)]
struct Loaded<'a>(&'a QuestConfig);

impl foreverquest_game::ConfigLoader for Loaded<'_> {
    type Error = std::convert::Infallible;

    fn load_config(&self) -> Result<QuestConfig, Self::Error> {
        Ok(self.0.clone())
    }
}

fn engine(config: &QuestConfig) -> QuizEngine<Loaded<'_>, MemoryStorage> {
    QuizEngine::new(Loaded(config), MemoryStorage::default())
}

pub fn catalog() -> Vec<TestScenario> {
    vec![
        TestScenario {
            key: "smoke",
            name: "Random Play-through",
            description: "Answer randomly, finish every game, confirm the ending",
            check: smoke,
        },
        TestScenario {
            key: "path-beach",
            name: "Beach Path Ending",
            description: "Favoring beach answers resolves the beach ending",
            check: |ctx| favored_path(ctx, PathTag::Beach),
        },
        TestScenario {
            key: "path-adventure",
            name: "Adventure Path Ending",
            description: "Favoring adventure answers resolves the adventure ending",
            check: |ctx| favored_path(ctx, PathTag::Adventure),
        },
        TestScenario {
            key: "path-cozy",
            name: "Cozy Path Ending",
            description: "Favoring cozy answers resolves the cozy ending",
            check: |ctx| favored_path(ctx, PathTag::Cozy),
        },
        TestScenario {
            key: "path-creative",
            name: "Creative Path Ending",
            description: "Favoring creative answers resolves the creative ending",
            check: |ctx| favored_path(ctx, PathTag::Creative),
        },
        TestScenario {
            key: "skip-all",
            name: "Skip Everything",
            description: "Skipping every step still reaches the default ending",
            check: skip_all,
        },
        TestScenario {
            key: "resume",
            name: "Save and Resume",
            description: "Progress saved mid-quest resumes exactly; finished runs do not",
            check: resume_round_trip,
        },
        TestScenario {
            key: "memory-pairs",
            name: "Memory Match Rules",
            description: "Mismatches lock then flip back; all pairs win",
            check: memory_pairs,
        },
        TestScenario {
            key: "catch-rounds",
            name: "Catch the Hearts Rounds",
            description: "Timing out loses, a retry can still win",
            check: catch_rounds,
        },
        TestScenario {
            key: "maze-connectivity",
            name: "Maze Connectivity",
            description: "Every generated maze is fully connected and solvable",
            check: maze_connectivity,
        },
        TestScenario {
            key: "puzzle-solvability",
            name: "Sliding Puzzle Solvability",
            description: "Solvable shuffles can be finished; others are reported",
            check: puzzle_solvability,
        },
    ]
}

#[must_use]
pub fn find_scenario(key: &str) -> Option<TestScenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

/// Expand `all` into every catalog key, keeping explicit keys in order.
#[must_use]
pub fn expand_scenarios(requested: &[String]) -> Vec<String> {
    if requested.iter().any(|key| key == "all") {
        return catalog().iter().map(|s| s.key.to_string()).collect();
    }
    requested.to_vec()
}

fn smoke(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let summary = play_through(&engine(ctx.config), AnswerStrategy::Random, ctx.seed)?;
    let ending = summary.ending.as_deref().context("no ending recorded")?;
    ensure!(
        ctx.config.ending(ending).is_some(),
        "ending {ending} is not configured"
    );
    Ok(format!(
        "ending {ending}, {} games won, {} skipped",
        summary.games_won, summary.games_skipped
    ))
}

fn favored_path(ctx: &ScenarioCtx<'_>, tag: PathTag) -> Result<String> {
    let has_tag = ctx
        .config
        .questions
        .iter()
        .any(|q| (0..q.options.len()).any(|i| q.path_for(i) == Some(tag)));
    if !has_tag {
        return Ok(format!("no options lean {tag}; nothing to check"));
    }
    let summary = play_through(&engine(ctx.config), AnswerStrategy::Favor(tag), ctx.seed)?;
    let resolved = foreverquest_game::resolve_path(&summary.path_scores);
    ensure!(resolved == tag, "favoring {tag} resolved {resolved}");
    ensure!(
        summary.ending.as_deref() == Some(resolved.ending_id().as_str()),
        "ending {:?} does not match resolved path {resolved}",
        summary.ending
    );
    Ok(format!("{tag} scored {}", summary.path_scores.get(tag)))
}

fn skip_all(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let summary = play_through(&engine(ctx.config), AnswerStrategy::SkipAll, ctx.seed)?;
    ensure!(
        summary.path_scores.total() == 0,
        "skipping scored {:?}",
        summary.path_scores
    );
    ensure!(
        summary.ending == Some(PathTag::DEFAULT.ending_id()),
        "expected default ending, got {:?}",
        summary.ending
    );
    Ok(String::from("default ending reached"))
}

fn resume_round_trip(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let engine = engine(ctx.config);
    let now = start_time_for(ctx.seed);
    let mut session = engine.start(Settings::default(), now)?;
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let hops = rng.gen_range(1..session.sequencer().len().max(2));
    for _ in 0..hops {
        if !matches!(session.view(), View::Step(_)) {
            break;
        }
        engine.dispatch(&mut session, Intent::Skip, now)?;
    }

    let resumed = engine.resume()?;
    match (session.state().current_index, resumed) {
        (0, None) => {}
        (_, Some(resumed)) => ensure!(
            resumed.state() == session.state(),
            "resumed state differs from saved state"
        ),
        (index, None) => return Err(anyhow!("progress at step {index} was not resumable")),
    }

    while !matches!(session.view(), View::Confirmation) {
        let intent = match session.view() {
            View::Ending => Intent::Confirm,
            _ => Intent::Skip,
        };
        engine.dispatch(&mut session, intent, now)?;
    }
    ensure!(
        load_resumable(engine.storage())? == Resume::Fresh,
        "a finished session offered to resume"
    );
    ensure!(
        engine.storage().read(foreverquest_game::constants::STATE_KEY)?.is_some(),
        "finished session was not kept"
    );
    Ok(format!("resumed after {hops} steps"))
}

fn game_seed<'a>(ctx: &ScenarioCtx<'a>, kind: GameKind) -> Option<(u64, &'a foreverquest_game::GameSpec)> {
    let spec = ctx.config.games.iter().find(|g| g.kind == kind)?;
    Some((derive_game_seed(ctx.seed, &spec.id), spec))
}

fn memory_pairs(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let Some((seed, spec)) = game_seed(ctx, GameKind::MemoryMatch) else {
        return Ok(String::from("no memory game configured"));
    };
    let mut game = MemoryMatch::new(&spec.settings, &mut ChaCha20Rng::seed_from_u64(seed));
    let tokens: Vec<String> = game.cards().iter().map(|c| c.token.clone()).collect();

    if let Some(other) = (1..tokens.len()).find(|&j| tokens[j] != tokens[0]) {
        ensure!(game.select(0) == Flip::Revealed, "first flip should reveal");
        ensure!(game.select(other) == Flip::Mismatched, "different tokens must mismatch");
        ensure!(game.select(0) == Flip::Ignored, "locked board must ignore clicks");
        game.settle();
        ensure!(!game.is_locked(), "settle must unlock the board");
    }

    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut board = foreverquest_game::GameBoard::Memory(game);
    let outcome = crate::logic::finish_game(&mut board, &mut rng).context("memory not finished")?;
    ensure!(outcome.won, "all pairs matched should win");
    Ok(format!("{} cards", tokens.len()))
}

fn catch_rounds(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let Some((seed, spec)) = game_seed(ctx, GameKind::CatchTheHearts) else {
        return Ok(String::from("no catch game configured"));
    };
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut game = CatchTheHearts::new(&spec.settings);

    // Let the clock run out without catching anything.
    let mut lost = None;
    for _ in 0..=spec.settings.duration_seconds {
        game.spawn(&mut rng);
        if let Some(outcome) = game.tick() {
            lost = Some(outcome);
            break;
        }
    }
    let lost = lost.context("countdown never ended the round")?;
    if spec.settings.target_score > 0 {
        ensure!(!lost.won, "an empty round should not win");
    }
    ensure!(game.time_left() == 0, "timed-out round keeps time");
    ensure!(game.hearts().is_empty(), "ended round keeps hearts on screen");

    game.restart();
    ensure!(game.is_running() && game.score() == 0, "restart resets the round");
    let mut board = foreverquest_game::GameBoard::Catch(game);
    let won = crate::logic::finish_game(&mut board, &mut rng).context("retry never ended")?;
    ensure!(won.won, "catching every heart should win");
    Ok(format!("retry scored {}", won.score.unwrap_or_default()))
}

fn maze_connectivity(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut longest = 0;
    for size in 2..=12 {
        let maze = Maze::generate(size, &mut rng);
        ensure!(
            maze.reachable_from_start() == size * size,
            "size {size} maze is not fully connected"
        );
        let path = maze.solve();
        ensure!(!path.is_empty(), "size {size} maze has no path to the goal");
        longest = longest.max(path.len());
    }
    Ok(format!("longest shortest path {longest}"))
}

fn puzzle_solvability(ctx: &ScenarioCtx<'_>) -> Result<String> {
    let mut puzzle = SlidingPuzzle::shuffled(&mut ChaCha20Rng::seed_from_u64(ctx.seed));
    let Some(clicks) = puzzle.solve() else {
        ensure!(!puzzle.is_solvable(), "solver gave up on a solvable board");
        return Ok(String::from("unsolvable shuffle"));
    };
    let mut outcome = None;
    for slot in &clicks {
        outcome = puzzle.click(*slot);
    }
    ensure!(
        clicks.is_empty() || outcome.is_some_and(|o| o.won),
        "solver path did not finish the picture"
    );
    ensure!(puzzle.is_solved(), "board not solved after solver path");
    Ok(format!("solved in {} moves", clicks.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let keys: Vec<_> = catalog().iter().map(|s| s.key).collect();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
        assert!(find_scenario("smoke").is_some());
        assert!(find_scenario("nope").is_none());
    }

    #[test]
    fn all_expands_to_catalog() {
        let expanded = expand_scenarios(&[String::from("all")]);
        assert_eq!(expanded.len(), catalog().len());
        let explicit = expand_scenarios(&[String::from("maze-connectivity")]);
        assert_eq!(explicit, vec![String::from("maze-connectivity")]);
    }

    #[test]
    fn every_scenario_passes_on_bundled_quest() {
        let config = QuestConfig::bundled().unwrap();
        for scenario in catalog() {
            for seed in [1, 1337] {
                let ctx = ScenarioCtx {
                    config: &config,
                    seed,
                };
                let result = (scenario.check)(&ctx);
                assert!(result.is_ok(), "{} seed {seed}: {result:?}", scenario.key);
            }
        }
    }
}
