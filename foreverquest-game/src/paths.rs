//! Path tags and the per-path score table.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narrative branch an option can lean toward.
///
/// Declaration order is the enumeration order used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathTag {
    Beach,
    Adventure,
    Cozy,
    Creative,
}

impl PathTag {
    /// Every tag, in enumeration order.
    pub const ALL: [PathTag; 4] = [
        PathTag::Beach,
        PathTag::Adventure,
        PathTag::Cozy,
        PathTag::Creative,
    ];

    /// Tag chosen when nothing has been scored.
    pub const DEFAULT: PathTag = PathTag::Cozy;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PathTag::Beach => "beach",
            PathTag::Adventure => "adventure",
            PathTag::Cozy => "cozy",
            PathTag::Creative => "creative",
        }
    }

    /// Id of the ending record that belongs to this path.
    #[must_use]
    pub fn ending_id(self) -> String {
        format!("ending-{}", self.as_str())
    }
}

impl fmt::Display for PathTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path tag '{0}'")]
pub struct UnknownPathTag(pub String);

impl FromStr for PathTag {
    type Err = UnknownPathTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PathTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPathTag(trimmed.to_string()))
    }
}

/// Accumulated score per path tag. Counters never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathScores {
    #[serde(default)]
    pub beach: u32,
    #[serde(default)]
    pub adventure: u32,
    #[serde(default)]
    pub cozy: u32,
    #[serde(default)]
    pub creative: u32,
}

impl PathScores {
    #[must_use]
    pub const fn get(&self, tag: PathTag) -> u32 {
        match tag {
            PathTag::Beach => self.beach,
            PathTag::Adventure => self.adventure,
            PathTag::Cozy => self.cozy,
            PathTag::Creative => self.creative,
        }
    }

    const fn slot_mut(&mut self, tag: PathTag) -> &mut u32 {
        match tag {
            PathTag::Beach => &mut self.beach,
            PathTag::Adventure => &mut self.adventure,
            PathTag::Cozy => &mut self.cozy,
            PathTag::Creative => &mut self.creative,
        }
    }

    pub fn increment(&mut self, tag: PathTag) {
        let slot = self.slot_mut(tag);
        *slot = slot.saturating_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        PathTag::ALL.iter().map(|tag| self.get(*tag)).sum()
    }

    /// Iterate `(tag, score)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (PathTag, u32)> + '_ {
        PathTag::ALL.into_iter().map(|tag| (tag, self.get(tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!("Beach".parse::<PathTag>(), Ok(PathTag::Beach));
        assert_eq!(" cozy ".parse::<PathTag>(), Ok(PathTag::Cozy));
        assert!("".parse::<PathTag>().is_err());
        assert!("mountain".parse::<PathTag>().is_err());
    }

    #[test]
    fn scores_serialize_as_flat_object() {
        let mut scores = PathScores::default();
        scores.increment(PathTag::Creative);
        scores.increment(PathTag::Creative);
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"beach": 0, "adventure": 0, "cozy": 0, "creative": 2})
        );
        assert_eq!(scores.total(), 2);
    }

    #[test]
    fn ending_ids_follow_tag_names() {
        assert_eq!(PathTag::Adventure.ending_id(), "ending-adventure");
    }
}
