use std::fmt;

use foreverquest_game::{Intent, PathTag, Question, QuestionKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Short answers the automated players type.
const SHORT_ANSWERS: [&str; 5] = ["Forever", "Home", "Yes", "Always", "Us"];

/// Policy interface for answering questions during automated runs.
pub trait AnswerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Intents that answer `question`. An empty list leaves it unanswered.
    fn answer(&mut self, question: &Question) -> Vec<Intent>;
}

/// Built-in answering strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerStrategy {
    /// Always pick options tagged with one path.
    Favor(PathTag),
    /// Seeded random answers.
    Random,
    /// Leave every question unanswered.
    SkipAll,
}

impl AnswerStrategy {
    #[must_use]
    pub fn label(self) -> String {
        match self {
            AnswerStrategy::Favor(tag) => format!("Favor {tag}"),
            AnswerStrategy::Random => String::from("Random"),
            AnswerStrategy::SkipAll => String::from("Skip All"),
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn AnswerPolicy> {
        match self {
            AnswerStrategy::Favor(tag) => Box::new(FavorPathPolicy { tag }),
            AnswerStrategy::Random => Box::new(RandomPolicy {
                rng: ChaCha20Rng::seed_from_u64(seed),
            }),
            AnswerStrategy::SkipAll => Box::new(SkipPolicy),
        }
    }
}

impl fmt::Display for AnswerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn scale_top(question: &Question) -> u8 {
    u8::try_from(question.scale_levels()).unwrap_or(u8::MAX)
}

struct FavorPathPolicy {
    tag: PathTag,
}

impl AnswerPolicy for FavorPathPolicy {
    fn name(&self) -> &'static str {
        "favor-path"
    }

    fn answer(&mut self, question: &Question) -> Vec<Intent> {
        let tagged: Vec<usize> = (0..question.options.len())
            .filter(|&index| question.path_for(index) == Some(self.tag))
            .collect();
        let question_id = question.id.clone();
        match question.kind {
            QuestionKind::Single => vec![Intent::SelectOption {
                question: question_id,
                index: tagged.first().copied().unwrap_or(0),
            }],
            QuestionKind::Multi => {
                let picks = if tagged.is_empty() { vec![0] } else { tagged };
                picks
                    .into_iter()
                    .map(|index| Intent::ToggleOption {
                        question: question_id.clone(),
                        index,
                    })
                    .collect()
            }
            QuestionKind::Scale => vec![Intent::SetScale {
                question: question_id,
                level: scale_top(question),
            }],
            QuestionKind::Short => vec![Intent::SetText {
                question: question_id,
                text: SHORT_ANSWERS[0].to_string(),
            }],
        }
    }
}

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl AnswerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn answer(&mut self, question: &Question) -> Vec<Intent> {
        let question_id = question.id.clone();
        let options = question.options.len();
        match question.kind {
            QuestionKind::Single if options > 0 => vec![Intent::SelectOption {
                question: question_id,
                index: self.rng.gen_range(0..options),
            }],
            QuestionKind::Multi if options > 0 => {
                let mut indices: Vec<usize> = (0..options).collect();
                indices.shuffle(&mut self.rng);
                let take = self.rng.gen_range(1..=options);
                indices
                    .into_iter()
                    .take(take)
                    .map(|index| Intent::ToggleOption {
                        question: question_id.clone(),
                        index,
                    })
                    .collect()
            }
            QuestionKind::Scale if scale_top(question) > 0 => vec![Intent::SetScale {
                question: question_id,
                level: self.rng.gen_range(1..=scale_top(question)),
            }],
            QuestionKind::Short => {
                let word = SHORT_ANSWERS
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(SHORT_ANSWERS[0]);
                vec![Intent::SetText {
                    question: question_id,
                    text: word.to_string(),
                }]
            }
            QuestionKind::Single | QuestionKind::Multi | QuestionKind::Scale => Vec::new(),
        }
    }
}

struct SkipPolicy;

impl AnswerPolicy for SkipPolicy {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn answer(&mut self, _question: &Question) -> Vec<Intent> {
        Vec::new()
    }
}
