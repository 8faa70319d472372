//! Memory match: flip two cards, keep them if they match.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::MiniGame;
use crate::config::GameSettings;
use crate::state::GameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub token: String,
    pub face: CardFace,
}

/// What a card selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Board locked, card already up, or card already matched.
    Ignored,
    /// First card of a pair turned up.
    Revealed,
    /// Second card matched the first; `won` is set on the final pair.
    Matched { won: bool },
    /// Second card differs; call [`MemoryMatch::settle`] after the flip-back delay.
    Mismatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMatch {
    cards: Vec<Card>,
    face_up: SmallVec<[usize; 2]>,
    locked: bool,
    matched_pairs: usize,
    total_pairs: usize,
}

impl MemoryMatch {
    /// Lay out the configured pairs, shuffled when the settings ask for it.
    pub fn new<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> Self {
        let mut tokens: Vec<String> = settings.pairs.iter().flatten().cloned().collect();
        if settings.shuffle {
            tokens.shuffle(rng);
        }
        Self::with_layout(tokens, settings.pairs.len())
    }

    /// Board with a fixed card order.
    #[must_use]
    pub fn with_layout(tokens: Vec<String>, total_pairs: usize) -> Self {
        Self {
            cards: tokens
                .into_iter()
                .map(|token| Card {
                    token,
                    face: CardFace::Down,
                })
                .collect(),
            face_up: SmallVec::new(),
            locked: false,
            matched_pairs: 0,
            total_pairs,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub const fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn select(&mut self, index: usize) -> Flip {
        if self.locked || self.face_up.contains(&index) {
            return Flip::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return Flip::Ignored;
        };
        if card.face != CardFace::Down {
            return Flip::Ignored;
        }
        card.face = CardFace::Up;
        self.face_up.push(index);

        let [first, second] = self.face_up[..] else {
            return Flip::Revealed;
        };

        if self.cards[first].token == self.cards[second].token {
            self.cards[first].face = CardFace::Matched;
            self.cards[second].face = CardFace::Matched;
            self.face_up.clear();
            self.matched_pairs += 1;
            Flip::Matched {
                won: self.is_won(),
            }
        } else {
            self.locked = true;
            Flip::Mismatched
        }
    }

    /// Turn a mismatched pair face-down and unlock the board.
    pub fn settle(&mut self) {
        if !self.locked {
            return;
        }
        for index in self.face_up.drain(..) {
            if let Some(card) = self.cards.get_mut(index) {
                card.face = CardFace::Down;
            }
        }
        self.locked = false;
    }
}

impl MiniGame for MemoryMatch {
    fn is_won(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.is_won().then(GameOutcome::won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn board() -> MemoryMatch {
        let tokens = ["a", "b", "a", "b"].map(String::from).to_vec();
        MemoryMatch::with_layout(tokens, 2)
    }

    #[test]
    fn matching_pair_locks_cards() {
        let mut game = board();
        assert_eq!(game.select(0), Flip::Revealed);
        assert_eq!(game.select(0), Flip::Ignored);
        assert_eq!(game.select(2), Flip::Matched { won: false });
        assert_eq!(game.cards()[0].face, CardFace::Matched);
        assert_eq!(game.select(0), Flip::Ignored);
        assert!(game.outcome().is_none());
    }

    #[test]
    fn mismatch_locks_until_settled_then_faces_down() {
        let mut game = board();
        game.select(0);
        assert_eq!(game.select(1), Flip::Mismatched);
        assert!(game.is_locked());
        assert_eq!(game.select(3), Flip::Ignored);
        assert_eq!(game.cards()[1].face, CardFace::Up);

        game.settle();
        assert!(!game.is_locked());
        assert!(game.cards().iter().all(|c| c.face == CardFace::Down));
    }

    #[test]
    fn win_only_when_every_pair_matched() {
        let mut game = board();
        game.select(0);
        game.select(2);
        game.select(1);
        assert_eq!(game.select(3), Flip::Matched { won: true });
        assert_eq!(game.matched_pairs(), game.total_pairs());
        assert_eq!(game.outcome(), Some(GameOutcome::won()));
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let settings = GameSettings {
            pairs: vec![
                vec!["x".into(), "x".into()],
                vec!["y".into(), "y".into()],
                vec!["z".into(), "z".into()],
            ],
            ..GameSettings::default()
        };
        let a = MemoryMatch::new(&settings, &mut ChaCha20Rng::seed_from_u64(5));
        let b = MemoryMatch::new(&settings, &mut ChaCha20Rng::seed_from_u64(5));
        assert_eq!(a.cards(), b.cards());
        assert_eq!(a.cards().len(), 6);

        let unshuffled = MemoryMatch::new(
            &GameSettings {
                shuffle: false,
                ..settings
            },
            &mut ChaCha20Rng::seed_from_u64(5),
        );
        let order: Vec<&str> = unshuffled.cards().iter().map(|c| c.token.as_str()).collect();
        assert_eq!(order, ["x", "x", "y", "y", "z", "z"]);
    }
}
