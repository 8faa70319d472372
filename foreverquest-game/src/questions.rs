//! Answer handling for the four question kinds.
use thiserror::Error;

use crate::config::{QuestConfig, Question, QuestionKind};
use crate::constants::SHORT_TEXT_MAX_CHARS;
use crate::state::{Answer, Selection, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("question '{id}' is a {actual:?} question, not {expected:?}")]
    WrongKind {
        id: String,
        expected: QuestionKind,
        actual: QuestionKind,
    },
    #[error("question '{id}' has no option {index}")]
    OptionOutOfRange { id: String, index: usize },
    #[error("question '{id}' accepts levels 1..={max}, got {level}")]
    LevelOutOfRange { id: String, level: u8, max: usize },
}

fn expect_kind(question: &Question, expected: QuestionKind) -> Result<(), AnswerError> {
    if question.kind == expected {
        Ok(())
    } else {
        Err(AnswerError::WrongKind {
            id: question.id.clone(),
            expected,
            actual: question.kind,
        })
    }
}

fn option_text(question: &Question, index: usize) -> Result<String, AnswerError> {
    question
        .options
        .get(index)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| AnswerError::OptionOutOfRange {
            id: question.id.clone(),
            index,
        })
}

/// Record a single-choice selection.
///
/// A path-tagged option adds one to its path every time it is selected.
/// Switching away from an earlier choice does not take its point back.
///
/// # Errors
///
/// Returns an error for a non-single question or an unknown option.
pub fn select_single(
    state: &mut SessionState,
    question: &Question,
    index: usize,
) -> Result<(), AnswerError> {
    expect_kind(question, QuestionKind::Single)?;
    let text = option_text(question, index)?;
    let path = question.path_for(index);
    state.answers.insert(
        question.id.clone(),
        Answer::Single {
            value: index,
            text,
            path,
        },
    );
    if let Some(tag) = path {
        state.path_scores.increment(tag);
    }
    Ok(())
}

/// Toggle an option of a multi-choice question, then recompute every path score.
///
/// Returns whether the option is selected after the toggle.
///
/// # Errors
///
/// Returns an error for a non-multi question or an unknown option.
pub fn toggle_multi(
    state: &mut SessionState,
    config: &QuestConfig,
    question: &Question,
    index: usize,
) -> Result<bool, AnswerError> {
    expect_kind(question, QuestionKind::Multi)?;
    let text = option_text(question, index)?;

    let mut selections = match state.answers.remove(&question.id) {
        Some(Answer::Multi { value }) => value,
        _ => Vec::new(),
    };
    let selected = match selections.iter().position(|s| s.value == index) {
        Some(pos) => {
            selections.remove(pos);
            false
        }
        None => {
            selections.push(Selection {
                value: index,
                text,
                path: question.path_for(index),
            });
            selections.sort_by_key(|s| s.value);
            true
        }
    };
    state.answers.insert(
        question.id.clone(),
        Answer::Multi { value: selections },
    );

    recompute_path_scores(state, config);
    Ok(selected)
}

/// Rebuild all path scores from the recorded choice answers.
///
/// Only questions that carry path tags are scanned. Running this twice in a
/// row yields the same scores.
pub fn recompute_path_scores(state: &mut SessionState, config: &QuestConfig) {
    state.path_scores.reset();
    for question in config.questions.iter().filter(|q| q.has_paths()) {
        let Some(answer) = state.answers.get(&question.id) else {
            continue;
        };
        for tag in answer.paths() {
            state.path_scores.increment(tag);
        }
    }
    log::debug!("path scores recomputed: {:?}", state.path_scores);
}

/// Record a scale level (`1..=N`).
///
/// # Errors
///
/// Returns an error for a non-scale question or a level outside the labels.
pub fn set_scale(
    state: &mut SessionState,
    question: &Question,
    level: u8,
) -> Result<(), AnswerError> {
    expect_kind(question, QuestionKind::Scale)?;
    let max = question.scale_levels();
    if level == 0 || usize::from(level) > max {
        return Err(AnswerError::LevelOutOfRange {
            id: question.id.clone(),
            level,
            max,
        });
    }
    state
        .answers
        .insert(question.id.clone(), Answer::Scale { value: level });
    Ok(())
}

/// Cut input down to the accepted short-text length.
#[must_use]
pub fn clamp_short_text(raw: &str) -> &str {
    match raw.char_indices().nth(SHORT_TEXT_MAX_CHARS) {
        Some((byte_idx, _)) => &raw[..byte_idx],
        None => raw,
    }
}

/// Live `"len/max"` counter for the untrimmed input.
#[must_use]
pub fn char_counter(raw: &str) -> String {
    format!(
        "{}/{SHORT_TEXT_MAX_CHARS}",
        clamp_short_text(raw).chars().count()
    )
}

/// Record free text. The stored value is trimmed; returns whether it is non-empty.
///
/// # Errors
///
/// Returns an error for a non-short question.
pub fn set_short_text(
    state: &mut SessionState,
    question: &Question,
    raw: &str,
) -> Result<bool, AnswerError> {
    expect_kind(question, QuestionKind::Short)?;
    let value = clamp_short_text(raw).trim().to_string();
    let filled = !value.is_empty();
    state
        .answers
        .insert(question.id.clone(), Answer::Short { value });
    Ok(filled)
}
