//! Step sequencer: resolves the configured sequence and gates navigation.
use crate::config::{GameSpec, Interlude, QuestConfig, Question, QuestionKind, SequenceKind};
use crate::state::SessionState;

/// A resolved, displayable step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Interlude(Interlude),
    Question(Question),
    Game(GameSpec),
    Ending,
}

impl Step {
    /// Id of the referenced record, if the step has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Step::Interlude(i) => Some(&i.id),
            Step::Question(q) => Some(&q.id),
            Step::Game(g) => Some(&g.id),
            Step::Ending => None,
        }
    }

    /// Whether the step counts as done for forward navigation.
    #[must_use]
    pub fn is_complete(&self, state: &SessionState) -> bool {
        match self {
            Step::Interlude(_) | Step::Ending => true,
            Step::Question(q) => match q.kind {
                QuestionKind::Single | QuestionKind::Scale => state.answer(&q.id).is_some(),
                QuestionKind::Multi | QuestionKind::Short => {
                    state.answer(&q.id).is_some_and(crate::state::Answer::is_filled)
                }
            },
            Step::Game(g) => state.game_won(&g.id),
        }
    }
}

/// Expand the configured sequence into concrete steps.
///
/// Entries whose reference cannot be found are dropped. The result always
/// ends with exactly one [`Step::Ending`].
#[must_use]
pub fn resolve_steps(config: &QuestConfig) -> Vec<Step> {
    let last = config.sequence.len().saturating_sub(1);
    let mut steps = Vec::with_capacity(config.sequence.len() + 1);

    for (pos, entry) in config.sequence.iter().enumerate() {
        let reference = entry.reference.as_deref().unwrap_or_default();
        let step = match entry.kind {
            SequenceKind::Interlude => config.interlude(reference).cloned().map(Step::Interlude),
            SequenceKind::Question => config.question(reference).cloned().map(Step::Question),
            SequenceKind::Game => config.game(reference).cloned().map(Step::Game),
            SequenceKind::Ending => {
                if pos != last {
                    log::warn!("ending marker at position {pos} is not last; dropped");
                }
                continue;
            }
        };
        match step {
            Some(step) => steps.push(step),
            None => log::warn!(
                "sequence entry {pos} ({:?} '{reference}') has no matching record; dropped",
                entry.kind
            ),
        }
    }

    if config.sequence.last().map(|e| e.kind) != Some(SequenceKind::Ending) {
        log::warn!("sequence does not end with an ending marker; appending one");
    }
    steps.push(Step::Ending);
    steps
}

/// Progress through the resolved steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completed share, `0.0..=1.0`.
    pub fraction: f32,
    pub position: usize,
    pub total: usize,
}

impl Progress {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Step {} of {}", self.position, self.total)
    }

    #[must_use]
    pub fn percent(&self) -> f32 {
        self.fraction * 100.0
    }
}

/// Ordered step list plus navigation rules over a session's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    steps: Vec<Step>,
}

impl Sequencer {
    #[must_use]
    pub fn new(config: &QuestConfig) -> Self {
        Self {
            steps: resolve_steps(config),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// True once the index reaches the ending marker's slot.
    #[must_use]
    pub fn at_ending(&self, state: &SessionState) -> bool {
        state.current_index + 1 >= self.steps.len()
    }

    /// Step to render at the session's index, or `None` when the ending takes over.
    #[must_use]
    pub fn current<'a>(&'a self, state: &SessionState) -> Option<&'a Step> {
        if self.at_ending(state) {
            None
        } else {
            self.steps.get(state.current_index)
        }
    }

    #[must_use]
    pub fn can_go_back(&self, state: &SessionState) -> bool {
        state.current_index > 0 && !self.at_ending(state)
    }

    #[must_use]
    pub fn can_go_next(&self, state: &SessionState) -> bool {
        self.current(state).is_some_and(|step| step.is_complete(state))
    }

    #[must_use]
    pub fn can_skip(&self, state: &SessionState) -> bool {
        self.current(state).is_some()
    }

    /// Move forward one step; shared by next and skip.
    pub fn advance(&self, state: &mut SessionState) {
        state.current_index = (state.current_index + 1).min(self.steps.len());
    }

    /// Move back one step. Returns false at the first step.
    pub fn back(&self, state: &mut SessionState) -> bool {
        if state.current_index == 0 {
            return false;
        }
        state.current_index -= 1;
        true
    }

    /// Clamp a restored index back into range.
    pub fn clamp_index(&self, state: &mut SessionState) {
        if state.current_index > self.steps.len() {
            log::warn!(
                "restored index {} exceeds {} steps; clamping",
                state.current_index,
                self.steps.len()
            );
            state.current_index = self.steps.len();
        }
    }

    #[must_use]
    pub fn progress(&self, state: &SessionState) -> Progress {
        let span = self.steps.len().saturating_sub(1);
        #[allow(clippy::cast_precision_loss)]
        let fraction = if span == 0 {
            0.0
        } else {
            (state.current_index as f32 / span as f32).min(1.0)
        };
        Progress {
            fraction,
            position: state.current_index + 1,
            total: self.steps.len(),
        }
    }
}
