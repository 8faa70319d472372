use chrono::{TimeZone, Utc};
use foreverquest_game::constants::STATE_KEY;
use foreverquest_game::{
    BundledConfig, Intent, MemoryStorage, QuestConfig, QuizEngine, QuizSession, Resume,
    SessionState, SessionStorage, Settings, View, load_resumable, save_session,
};

#[test]
fn saved_position_and_answers_round_trip() {
    let storage = MemoryStorage::new();
    let t0 = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
    let mut quiz = QuizSession::start(QuestConfig::bundled().unwrap(), Settings::default(), t0);
    quiz.apply_at(Intent::Next, t0).unwrap();
    quiz.apply_at(
        Intent::SelectOption {
            question: "dream-weekend".into(),
            index: 3,
        },
        t0,
    )
    .unwrap();
    quiz.apply_at(Intent::Next, t0).unwrap();
    save_session(&storage, quiz.state()).unwrap();

    let Resume::Resumable(state) = load_resumable(&storage).unwrap() else {
        panic!("unfinished session should be resumable");
    };
    assert_eq!(state.current_index, 2);
    assert_eq!(state.answers.len(), 1);
    assert_eq!(state.started_at, t0);

    let resumed = QuizSession::resume(QuestConfig::bundled().unwrap(), state);
    assert_eq!(resumed.view(), View::Step(2));
    assert_eq!(resumed.state(), quiz.state());
}

#[test]
fn stored_json_uses_documented_shape() {
    let storage = MemoryStorage::new();
    let mut state = SessionState::fresh(Settings::default(), Utc::now());
    state.current_index = 5;
    save_session(&storage, &state).unwrap();

    let raw = storage.read(STATE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["currentIndex"], 5);
    assert!(value["completedAt"].is_null());
    assert!(value.get("pathScores").is_some());
}

#[test]
fn completed_sessions_are_never_resumed() {
    let engine = QuizEngine::new(BundledConfig, MemoryStorage::new());
    let now = Utc::now();
    let mut quiz = engine.start(Settings::default(), now).unwrap();
    while quiz.view() != View::Ending {
        engine.dispatch(&mut quiz, Intent::Skip, now).unwrap();
    }
    assert!(engine.resume().unwrap().is_some());

    engine.dispatch(&mut quiz, Intent::Confirm, now).unwrap();
    assert!(engine.resume().unwrap().is_none());
}

#[test]
fn unreadable_save_is_discarded() {
    let storage = MemoryStorage::new();
    storage.write(STATE_KEY, r#"{"currentIndex": "three"}"#).unwrap();
    assert_eq!(load_resumable(&storage).unwrap(), Resume::Fresh);
    assert!(storage.read(STATE_KEY).unwrap().is_none());
}

#[test]
fn restart_after_resume_keeps_settings() {
    let settings = Settings {
        dark_mode: false,
        reduced_motion: true,
    };
    let mut state = SessionState::fresh(settings, Utc::now());
    state.current_index = 4;
    let mut quiz = QuizSession::resume(QuestConfig::bundled().unwrap(), state);
    quiz.apply(Intent::Restart).unwrap();
    assert_eq!(quiz.view(), View::Step(0));
    assert_eq!(quiz.state().settings, settings);
}
