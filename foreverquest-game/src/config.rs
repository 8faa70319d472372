//! Quest document: the immutable content loaded once at startup.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_DURATION_SECONDS, DEFAULT_HEART_LIFETIME_MS, DEFAULT_MAZE_SIZE,
    DEFAULT_SPAWN_INTERVAL_MS, DEFAULT_TARGET_SCORE,
};
use crate::paths::PathTag;

const DEFAULT_QUEST_DATA: &str = include_str!("../../foreverquest-web/static/quest_config.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("quest document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("quest document has an empty sequence")]
    EmptySequence,
}

/// Flags that tune presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    #[serde(default = "default_true")]
    pub enable_confetti: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self {
            enable_confetti: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub app_title: String,
    #[serde(default)]
    pub ui: UiFlags,
}

/// Kind of entry in the configured sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    Interlude,
    Question,
    Game,
    Ending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    #[serde(rename = "type")]
    pub kind: SequenceKind,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multi,
    Scale,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub outro: String,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    /// Path tag per option index; blank entries carry no path.
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub placeholder: String,
}

impl Question {
    /// Whether any option carries a path tag.
    #[must_use]
    pub fn has_paths(&self) -> bool {
        self.path.iter().any(|p| !p.trim().is_empty())
    }

    /// Path tag attached to the option at `index`, if any.
    #[must_use]
    pub fn path_for(&self, index: usize) -> Option<PathTag> {
        let raw = self.path.get(index)?;
        if raw.trim().is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(tag) => Some(tag),
            Err(err) => {
                log::warn!("question {}: {err}", self.id);
                None
            }
        }
    }

    /// Number of levels offered by a scale question.
    #[must_use]
    pub fn scale_levels(&self) -> usize {
        self.labels.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interlude {
    pub id: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub outro: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    MemoryMatch,
    CatchTheHearts,
    Maze,
    Puzzle,
}

/// Union of per-game settings; each game reads only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default)]
    pub pairs: Vec<Vec<String>>,
    #[serde(default = "default_true")]
    pub shuffle: bool,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u32,
    #[serde(default = "default_spawn_interval_ms")]
    pub spawn_interval_ms: u32,
    #[serde(default = "default_heart_lifetime_ms")]
    pub heart_lifetime_ms: u32,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            shuffle: true,
            target_score: DEFAULT_TARGET_SCORE,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            heart_lifetime_ms: DEFAULT_HEART_LIFETIME_MS,
            grid_size: DEFAULT_MAZE_SIZE,
            image_id: None,
        }
    }
}

const fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}
const fn default_duration_seconds() -> u32 {
    DEFAULT_DURATION_SECONDS
}
const fn default_spawn_interval_ms() -> u32 {
    DEFAULT_SPAWN_INTERVAL_MS
}
const fn default_heart_lifetime_ms() -> u32 {
    DEFAULT_HEART_LIFETIME_MS
}
const fn default_grid_size() -> usize {
    DEFAULT_MAZE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GameKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub outro: String,
    #[serde(default)]
    pub settings: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ending {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub alt: String,
}

/// The full quest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuestConfig {
    #[serde(default)]
    pub meta: Meta,
    pub sequence: Vec<SequenceEntry>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub interludes: Vec<Interlude>,
    #[serde(default)]
    pub games: Vec<GameSpec>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub endings: Vec<Ending>,
}

impl QuestConfig {
    /// Parse a quest document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the sequence is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        Ok(config)
    }

    /// The quest document bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled document fails to parse.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_QUEST_DATA)
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn interlude(&self, id: &str) -> Option<&Interlude> {
        self.interludes.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn game(&self, id: &str) -> Option<&GameSpec> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Look up a gallery image; a missing id renders as a gap.
    #[must_use]
    pub fn image(&self, id: Option<&str>) -> Option<&GalleryImage> {
        let id = id?;
        let found = self.gallery.iter().find(|img| img.id == id);
        if found.is_none() {
            log::warn!("gallery image '{id}' not found");
        }
        found
    }

    #[must_use]
    pub fn ending(&self, id: &str) -> Option<&Ending> {
        self.endings.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document_with_defaults() {
        let json = r#"{
            "sequence": [
                {"type": "question", "ref": "q1"},
                {"type": "game", "ref": "g1"},
                {"type": "ending"}
            ],
            "questions": [
                {"id": "q1", "type": "single", "prompt": "Where?",
                 "options": ["Sand", "Snow"], "path": ["beach", ""]}
            ],
            "games": [{"id": "g1", "type": "catch-the-hearts", "settings": {"targetScore": 5}}]
        }"#;

        let config = QuestConfig::from_json(json).unwrap();
        assert!(config.meta.ui.enable_confetti);
        assert_eq!(config.sequence[2].kind, SequenceKind::Ending);
        assert!(config.sequence[2].reference.is_none());

        let q = config.question("q1").unwrap();
        assert_eq!(q.kind, QuestionKind::Single);
        assert_eq!(q.path_for(0), Some(PathTag::Beach));
        assert_eq!(q.path_for(1), None);
        assert_eq!(q.path_for(7), None);

        let g = config.game("g1").unwrap();
        assert_eq!(g.kind, GameKind::CatchTheHearts);
        assert_eq!(g.settings.target_score, 5);
        assert_eq!(g.settings.duration_seconds, DEFAULT_DURATION_SECONDS);
        assert!(g.settings.shuffle);
    }

    #[test]
    fn rejects_malformed_and_empty_documents() {
        assert!(matches!(
            QuestConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            QuestConfig::from_json(r#"{"sequence": []}"#),
            Err(ConfigError::EmptySequence)
        ));
        assert!(matches!(
            QuestConfig::from_json(r#"{"sequence": [{"type": "teleport"}]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn bundled_document_parses() {
        let config = QuestConfig::bundled().unwrap();
        assert!(!config.meta.app_title.is_empty());
        assert!(!config.endings.is_empty());
        for tag in PathTag::ALL {
            assert!(config.ending(&tag.ending_id()).is_some(), "missing {tag}");
        }
    }

    #[test]
    fn missing_image_is_a_gap() {
        let config = QuestConfig::bundled().unwrap();
        assert!(config.image(Some("no-such-image")).is_none());
        assert!(config.image(None).is_none());
    }
}
