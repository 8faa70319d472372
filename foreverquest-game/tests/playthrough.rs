use chrono::{DateTime, TimeZone, Utc};
use foreverquest_game::{
    Answer, GameBoard, GameOutcome, Intent, MiniGame, PathTag, QuestConfig, QuestionKind,
    QuizSession, Settings, Step, View,
    games::{Direction, Flip, MoveResult},
};
use std::collections::HashMap;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 18, 0, 0).unwrap()
}

fn two_question_quest() -> QuestConfig {
    QuestConfig::from_json(
        r#"{
        "meta": {"appTitle": "Test Quest"},
        "sequence": [
            {"type": "interlude", "ref": "hi"},
            {"type": "question", "ref": "q1"},
            {"type": "question", "ref": "q2"},
            {"type": "ending"}
        ],
        "interludes": [{"id": "hi", "text": "Welcome"}],
        "questions": [
            {"id": "q1", "type": "single", "prompt": "Where?",
             "options": ["Sand", "Blanket"], "path": ["beach", "cozy"]},
            {"id": "q2", "type": "single", "prompt": "And then?",
             "options": ["Waves", "Tea"], "path": ["beach", "cozy"]}
        ],
        "endings": [
            {"id": "ending-beach", "title": "Beach", "description": "Sun", "image": "img"},
            {"id": "ending-cozy", "title": "Cozy", "description": "Home", "image": "img"}
        ]
    }"#,
    )
    .unwrap()
}

fn select(question: &str, index: usize) -> Intent {
    Intent::SelectOption {
        question: question.into(),
        index,
    }
}

#[test]
fn beach_scenario_reaches_beach_ending() {
    let mut quiz = QuizSession::start(two_question_quest(), Settings::default(), t0());
    assert_eq!(quiz.sequencer().len(), 4);

    quiz.apply_at(Intent::Next, t0()).unwrap();
    quiz.apply_at(select("q1", 0), t0()).unwrap();
    quiz.apply_at(Intent::Next, t0()).unwrap();
    quiz.apply_at(Intent::Back, t0()).unwrap();
    assert_eq!(quiz.view(), View::Step(1));
    quiz.apply_at(select("q1", 0), t0()).unwrap();
    quiz.apply_at(Intent::Next, t0()).unwrap();
    quiz.apply_at(select("q2", 1), t0()).unwrap();

    assert_eq!(quiz.state().path_scores.beach, 2);
    assert_eq!(quiz.state().path_scores.cozy, 1);

    let effects = quiz.apply_at(Intent::Next, t0()).unwrap();
    assert!(effects.celebrate);
    assert_eq!(quiz.view(), View::Ending);
    assert_eq!(quiz.state().ending.as_deref(), Some("ending-beach"));
    assert_eq!(quiz.ending().map(|e| e.title.as_str()), Some("Beach"));

    quiz.apply_at(Intent::Confirm, t0()).unwrap();
    assert_eq!(quiz.view(), View::Confirmation);
    assert!(quiz.state().is_completed());
}

#[test]
fn ending_is_not_recomputed_after_late_answers() {
    let mut quiz = QuizSession::start(two_question_quest(), Settings::default(), t0());
    for _ in 0..3 {
        quiz.apply_at(Intent::Skip, t0()).unwrap();
    }
    assert_eq!(quiz.state().ending.as_deref(), Some("ending-cozy"));
    assert!(quiz.apply_at(Intent::Back, t0()).is_err());
    quiz.apply_at(select("q2", 0), t0()).unwrap();
    quiz.apply_at(select("q2", 0), t0()).unwrap();
    assert_eq!(quiz.state().path_scores.get(PathTag::Beach), 2);
    assert_eq!(quiz.state().ending.as_deref(), Some("ending-cozy"));
}

/// Plays every game of the bundled quest with its engine and answers every question.
#[test]
fn bundled_quest_plays_to_completion() {
    let config = QuestConfig::bundled().unwrap();
    let mut quiz = QuizSession::start(config, Settings::default(), t0());

    while let View::Step(_) = quiz.view() {
        let step = quiz.current_step().cloned().unwrap();
        match step {
            Step::Interlude(_) | Step::Ending => {}
            Step::Question(question) => {
                let intent = match question.kind {
                    QuestionKind::Single => select(&question.id, 2),
                    QuestionKind::Multi => Intent::ToggleOption {
                        question: question.id.clone(),
                        index: 2,
                    },
                    QuestionKind::Scale => Intent::SetScale {
                        question: question.id.clone(),
                        level: 5,
                    },
                    QuestionKind::Short => Intent::SetText {
                        question: question.id.clone(),
                        text: "  home  ".into(),
                    },
                };
                quiz.apply_at(intent, t0()).unwrap();
            }
            Step::Game(spec) => {
                let mut rng = quiz.game_rng(&spec.id);
                let Some(outcome) = play(GameBoard::new(&spec, &mut rng), &mut rng) else {
                    // An unsolvable puzzle shuffle can only be skipped.
                    quiz.apply_at(Intent::Skip, t0()).unwrap();
                    continue;
                };
                assert!(outcome.won, "{} should be won", spec.id);
                let effects = quiz
                    .apply_at(
                        Intent::GameFinished {
                            game: spec.id.clone(),
                            outcome,
                        },
                        t0(),
                    )
                    .unwrap();
                assert!(effects.celebrate);
            }
        }
        quiz.apply_at(Intent::Next, t0()).unwrap();
    }

    assert_eq!(quiz.view(), View::Ending);
    assert_eq!(quiz.state().ending.as_deref(), Some("ending-cozy"));
    assert_eq!(
        quiz.state().answer("one-word"),
        Some(&Answer::Short {
            value: "home".into()
        })
    );
    assert!(quiz.state().games.len() >= 3);
    assert!(quiz.state().games.values().all(|outcome| outcome.won));
}

fn play(board: GameBoard, rng: &mut rand_chacha::ChaCha20Rng) -> Option<GameOutcome> {
    match board {
        GameBoard::Memory(mut game) => {
            let mut seen: HashMap<String, Vec<usize>> = HashMap::new();
            for (idx, card) in game.cards().iter().enumerate() {
                seen.entry(card.token.clone()).or_default().push(idx);
            }
            for indexes in seen.values() {
                game.select(indexes[0]);
                assert!(matches!(game.select(indexes[1]), Flip::Matched { .. }));
            }
            game.outcome()
        }
        GameBoard::Catch(mut game) => loop {
            let heart = game.spawn(rng).unwrap();
            if let Some(outcome) = game.catch(heart.id) {
                return Some(outcome);
            }
        },
        GameBoard::Maze(mut game) => {
            let path: Vec<Direction> = game.maze().solve();
            for dir in path {
                if let MoveResult::Reached(outcome) = game.try_move(dir) {
                    return Some(outcome);
                }
            }
            panic!("maze walk never reached the goal");
        }
        GameBoard::Puzzle(mut game) => {
            let clicks = game.solve()?;
            if clicks.is_empty() {
                return Some(GameOutcome::solved(0));
            }
            clicks.into_iter().filter_map(|slot| game.click(slot)).last()
        }
    }
}
