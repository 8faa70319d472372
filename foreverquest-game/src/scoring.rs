//! Ending resolution from accumulated path scores.
use crate::config::{Ending, QuestConfig};
use crate::paths::{PathScores, PathTag};
use crate::state::SessionState;

/// Pick the path with the strictly highest score.
///
/// Ties go to the tag that comes first in enumeration order; an all-zero
/// table resolves to [`PathTag::DEFAULT`].
#[must_use]
pub fn resolve_path(scores: &PathScores) -> PathTag {
    let mut best = PathTag::DEFAULT;
    let mut best_score = 0;
    for (tag, score) in scores.iter() {
        if score > best_score {
            best = tag;
            best_score = score;
        }
    }
    best
}

/// Record the ending id on the session the first time it is asked for.
///
/// Returns the stored id. Later calls keep the first result even if scores
/// have moved since.
pub fn record_ending(state: &mut SessionState) -> &str {
    if state.ending.is_none() {
        let tag = resolve_path(&state.path_scores);
        log::debug!(
            "resolved ending path {tag} from scores {:?}",
            state.path_scores
        );
        state.ending = Some(tag.ending_id());
    }
    state.ending.as_deref().unwrap_or_default()
}

/// Look up the ending record for a session, if one has been resolved and configured.
#[must_use]
pub fn ending_for<'a>(config: &'a QuestConfig, state: &SessionState) -> Option<&'a Ending> {
    let id = state.ending.as_deref()?;
    let ending = config.ending(id);
    if ending.is_none() {
        log::warn!("ending '{id}' is not configured; showing fallback");
    }
    ending
}
