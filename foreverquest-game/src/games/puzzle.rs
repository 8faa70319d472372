//! Sliding picture puzzle on a 3x3 board.
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, VecDeque};

use super::MiniGame;
use crate::constants::PUZZLE_SIZE;
use crate::state::GameOutcome;

const TOTAL_PIECES: usize = PUZZLE_SIZE * PUZZLE_SIZE;
/// Piece id that stands for the empty slot.
pub const BLANK_PIECE: usize = TOTAL_PIECES - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingPuzzle {
    /// `pieces[slot]` is the piece id shown in that slot.
    pieces: Vec<usize>,
    blank: usize,
    moves: u32,
    won: bool,
}

impl SlidingPuzzle {
    /// Shuffle the pieces uniformly. The result is not checked for solvability.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pieces: Vec<usize> = (0..TOTAL_PIECES).collect();
        pieces.shuffle(rng);
        let blank = pieces
            .iter()
            .position(|&p| p == BLANK_PIECE)
            .unwrap_or(BLANK_PIECE);
        Self::with_blank(pieces, blank)
    }

    /// Board from an explicit arrangement of piece ids `0..9`.
    ///
    /// Returns `None` unless the arrangement is a permutation of every piece.
    #[must_use]
    pub fn from_pieces(pieces: Vec<usize>) -> Option<Self> {
        let mut sorted = pieces.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(0..TOTAL_PIECES) {
            return None;
        }
        let blank = pieces.iter().position(|&p| p == BLANK_PIECE)?;
        Some(Self::with_blank(pieces, blank))
    }

    const fn with_blank(pieces: Vec<usize>, blank: usize) -> Self {
        Self {
            pieces,
            blank,
            moves: 0,
            won: false,
        }
    }

    #[must_use]
    pub fn pieces(&self) -> &[usize] {
        &self.pieces
    }

    #[must_use]
    pub const fn blank(&self) -> usize {
        self.blank
    }

    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether every piece sits in its home slot.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.pieces.iter().enumerate().all(|(slot, &piece)| slot == piece)
    }

    /// Grid row and column of a slot or piece id.
    #[must_use]
    pub const fn coords(index: usize) -> (usize, usize) {
        (index / PUZZLE_SIZE, index % PUZZLE_SIZE)
    }

    #[must_use]
    pub const fn is_adjacent_to_blank(&self, slot: usize) -> bool {
        adjacent(slot, self.blank)
    }

    /// Slide the piece in `slot` into the blank.
    ///
    /// Returns the outcome when the move completes the picture. Non-adjacent
    /// clicks and clicks after the win change nothing.
    pub fn click(&mut self, slot: usize) -> Option<GameOutcome> {
        if self.won || slot >= TOTAL_PIECES || !self.is_adjacent_to_blank(slot) {
            return None;
        }
        self.pieces.swap(slot, self.blank);
        self.blank = slot;
        self.moves += 1;
        if self.is_solved() {
            self.won = true;
            Some(GameOutcome::solved(self.moves))
        } else {
            None
        }
    }

    /// Whether the current arrangement can still reach the solved board.
    ///
    /// On an odd-width board that holds iff the tiles (blank excluded) have an
    /// even number of inversions.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<usize> = self
            .pieces
            .iter()
            .copied()
            .filter(|&p| p != BLANK_PIECE)
            .collect();
        let inversions = tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| a > b).count())
            .sum::<usize>();
        inversions % 2 == 0
    }

    /// Shortest list of slots to click to finish the picture, or `None` when
    /// the arrangement cannot be solved.
    #[must_use]
    pub fn solve(&self) -> Option<Vec<usize>> {
        if !self.is_solvable() || self.pieces.len() != TOTAL_PIECES {
            return None;
        }
        let mut start = [0usize; TOTAL_PIECES];
        start.copy_from_slice(&self.pieces);
        let mut goal = [0usize; TOTAL_PIECES];
        for (slot, piece) in goal.iter_mut().enumerate() {
            *piece = slot;
        }

        let mut came_from: HashMap<[usize; TOTAL_PIECES], Option<([usize; TOTAL_PIECES], usize)>> =
            HashMap::from([(start, None)]);
        let mut queue = VecDeque::from([(start, self.blank)]);
        while let Some((board, blank)) = queue.pop_front() {
            if board == goal {
                break;
            }
            for slot in (0..TOTAL_PIECES).filter(|&slot| adjacent(slot, blank)) {
                let mut next = board;
                next.swap(slot, blank);
                came_from.entry(next).or_insert_with(|| {
                    queue.push_back((next, slot));
                    Some((board, slot))
                });
            }
        }

        let mut clicks = Vec::new();
        let mut cursor = goal;
        while let Some((prev, slot)) = *came_from.get(&cursor)? {
            clicks.push(slot);
            cursor = prev;
        }
        clicks.reverse();
        Some(clicks)
    }
}

const fn adjacent(a: usize, b: usize) -> bool {
    let (r1, c1) = SlidingPuzzle::coords(a);
    let (r2, c2) = SlidingPuzzle::coords(b);
    r1.abs_diff(r2) + c1.abs_diff(c2) == 1
}

impl MiniGame for SlidingPuzzle {
    fn is_won(&self) -> bool {
        self.won
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.won.then(|| GameOutcome::solved(self.moves))
    }
}
