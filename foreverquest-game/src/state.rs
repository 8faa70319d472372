//! Persisted session record.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::paths::{PathScores, PathTag};

/// One chosen option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub value: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathTag>,
}

/// Recorded answer, shaped by the question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Answer {
    Single {
        value: usize,
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathTag>,
    },
    /// Selections ordered by option index.
    Multi { value: Vec<Selection> },
    Scale { value: u8 },
    Short { value: String },
}

impl Answer {
    /// Whether the answer counts as filled in for navigation purposes.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            Answer::Single { .. } | Answer::Scale { .. } => true,
            Answer::Multi { value } => !value.is_empty(),
            Answer::Short { value } => !value.is_empty(),
        }
    }

    /// Path tags carried by this answer.
    #[must_use]
    pub fn paths(&self) -> Vec<PathTag> {
        match self {
            Answer::Single { path, .. } => path.iter().copied().collect(),
            Answer::Multi { value } => value.iter().filter_map(|s| s.path).collect(),
            Answer::Scale { .. } | Answer::Short { .. } => Vec::new(),
        }
    }
}

/// Result of a finished mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
}

impl GameOutcome {
    #[must_use]
    pub const fn won() -> Self {
        Self {
            won: true,
            score: None,
            steps: None,
            moves: None,
        }
    }

    #[must_use]
    pub const fn scored(score: u32, won: bool) -> Self {
        Self {
            won,
            score: Some(score),
            steps: None,
            moves: None,
        }
    }

    #[must_use]
    pub const fn walked(steps: u32) -> Self {
        Self {
            won: true,
            score: None,
            steps: Some(steps),
            moves: None,
        }
    }

    #[must_use]
    pub const fn solved(moves: u32) -> Self {
        Self {
            won: true,
            score: None,
            steps: None,
            moves: Some(moves),
        }
    }
}

/// Environment preferences captured when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_index: usize,
    #[serde(default)]
    pub answers: BTreeMap<String, Answer>,
    #[serde(default)]
    pub games: BTreeMap<String, GameOutcome>,
    #[serde(default)]
    pub path_scores: PathScores,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ending: Option<String>,
    #[serde(default)]
    pub settings: Settings,
}

impl SessionState {
    /// A brand-new session positioned at the first step.
    #[must_use]
    pub fn fresh(settings: Settings, started_at: DateTime<Utc>) -> Self {
        Self {
            current_index: 0,
            answers: BTreeMap::new(),
            games: BTreeMap::new(),
            path_scores: PathScores::default(),
            started_at,
            completed_at: None,
            ending: None,
            settings,
        }
    }

    /// Only sessions that were never confirmed can be resumed.
    #[must_use]
    pub const fn is_resumable(&self) -> bool {
        self.completed_at.is_none()
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn game_won(&self, game_id: &str) -> bool {
        self.games.get(game_id).is_some_and(|o| o.won)
    }

    /// Stamp the completion time.
    pub fn finalize(&mut self, completed_at: DateTime<Utc>) {
        self.completed_at = Some(completed_at);
    }

    /// Discard progress, keeping the captured settings.
    #[must_use]
    pub fn restarted(&self, started_at: DateTime<Utc>) -> Self {
        Self::fresh(self.settings, started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, 18, 30, 0).unwrap()
    }

    #[test]
    fn answers_serialize_with_type_tag() {
        let single = Answer::Single {
            value: 2,
            text: "Blanket fort".into(),
            path: Some(PathTag::Cozy),
        };
        let value = serde_json::to_value(&single).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "single", "value": 2, "text": "Blanket fort", "path": "cozy"})
        );

        let short: Answer = serde_json::from_str(r#"{"type":"short","value":"us"}"#).unwrap();
        assert_eq!(short, Answer::Short { value: "us".into() });
    }

    #[test]
    fn filled_depends_on_kind() {
        assert!(Answer::Scale { value: 1 }.is_filled());
        assert!(!Answer::Multi { value: vec![] }.is_filled());
        assert!(!Answer::Short { value: String::new() }.is_filled());
        assert!(Answer::Short { value: "x".into() }.is_filled());
    }

    #[test]
    fn session_json_uses_camel_case_and_null_completion() {
        let state = SessionState::fresh(Settings::default(), t0());
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["currentIndex"], 0);
        assert!(value["completedAt"].is_null());
        assert!(value["pathScores"].is_object());
        assert_eq!(value["settings"]["reducedMotion"], false);
    }

    #[test]
    fn restart_preserves_settings_only() {
        let settings = Settings {
            dark_mode: true,
            reduced_motion: true,
        };
        let mut state = SessionState::fresh(settings, t0());
        state.current_index = 4;
        state.path_scores.increment(PathTag::Beach);
        state.games.insert("g".into(), GameOutcome::won());
        state.finalize(t0());

        let restarted = state.restarted(t0());
        assert_eq!(restarted.current_index, 0);
        assert!(restarted.games.is_empty());
        assert_eq!(restarted.path_scores.total(), 0);
        assert!(restarted.is_resumable());
        assert_eq!(restarted.settings, settings);
    }
}
