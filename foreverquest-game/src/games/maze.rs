//! Maze: depth-first backtracking generation and single-cell traversal.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::MiniGame;
use crate::constants::MIN_MAZE_SIZE;
use crate::state::GameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Map an arrow key name to a direction.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::North),
            "ArrowRight" => Some(Direction::East),
            "ArrowDown" => Some(Direction::South),
            "ArrowLeft" => Some(Direction::West),
            _ => None,
        }
    }
}

/// Walls around one cell. `true` means the side is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    #[must_use]
    pub const fn blocks(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.top,
            Direction::East => self.right,
            Direction::South => self.bottom,
            Direction::West => self.left,
        }
    }

    const fn open(&mut self, dir: Direction) {
        match dir {
            Direction::North => self.top = false,
            Direction::East => self.right = false,
            Direction::South => self.bottom = false,
            Direction::West => self.left = false,
        }
    }
}

/// Square grid of cells with carved passages, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    size: usize,
    cells: Vec<Walls>,
}

impl Maze {
    /// Carve a maze by randomized depth-first backtracking from the top-left cell.
    ///
    /// Sizes below 2 are raised to 2.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let size = size.max(MIN_MAZE_SIZE);
        let mut maze = Self {
            size,
            cells: vec![Walls::default(); size * size],
        };
        let mut visited = vec![false; size * size];

        // Each frame is a cell plus its shuffled directions and how many were tried,
        // which walks the same order a recursive carve would.
        let mut stack: Vec<((usize, usize), [Direction; 4], usize)> = Vec::new();
        visited[0] = true;
        stack.push(((0, 0), shuffled_directions(rng), 0));

        while let Some(frame) = stack.last_mut() {
            let ((x, y), dirs, tried) = *frame;
            if tried == dirs.len() {
                stack.pop();
                continue;
            }
            frame.2 += 1;
            let dir = dirs[tried];
            let Some((nx, ny)) = maze.neighbor(x, y, dir) else {
                continue;
            };
            let next = maze.index(nx, ny);
            if visited[next] {
                continue;
            }
            let here = maze.index(x, y);
            maze.cells[here].open(dir);
            maze.cells[next].open(dir.opposite());
            visited[next] = true;
            stack.push(((nx, ny), shuffled_directions(rng), 0));
        }

        maze
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[must_use]
    pub fn walls(&self, x: usize, y: usize) -> Option<Walls> {
        (x < self.size && y < self.size).then(|| self.cells[self.index(x, y)])
    }

    fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.size && ny < self.size).then_some((nx, ny))
    }

    /// Cell reached by a legal move, or `None` if a wall or the edge is in the way.
    #[must_use]
    pub fn step(&self, (x, y): (usize, usize), dir: Direction) -> Option<(usize, usize)> {
        let walls = self.walls(x, y)?;
        if walls.blocks(dir) {
            return None;
        }
        self.neighbor(x, y, dir)
    }

    #[must_use]
    pub const fn goal(&self) -> (usize, usize) {
        (self.size - 1, self.size - 1)
    }

    /// Number of cells reachable from the start through legal moves.
    #[must_use]
    pub fn reachable_from_start(&self) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if let Some(next) = self.step(cell, dir) {
                    let idx = self.index(next.0, next.1);
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    /// Shortest sequence of moves from the start to the goal.
    #[must_use]
    pub fn solve(&self) -> Vec<Direction> {
        let mut came_from: Vec<Option<((usize, usize), Direction)>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([(0, 0)]);
        seen[0] = true;
        while let Some(cell) = queue.pop_front() {
            if cell == self.goal() {
                break;
            }
            for dir in Direction::ALL {
                if let Some(next) = self.step(cell, dir) {
                    let idx = self.index(next.0, next.1);
                    if !seen[idx] {
                        seen[idx] = true;
                        came_from[idx] = Some((cell, dir));
                        queue.push_back(next);
                    }
                }
            }
        }

        let mut path = Vec::new();
        let mut cursor = self.goal();
        while let Some((prev, dir)) = came_from[self.index(cursor.0, cursor.1)] {
            path.push(dir);
            cursor = prev;
        }
        path.reverse();
        path
    }
}

fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    dirs.shuffle(rng);
    dirs
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Blocked,
    Moved,
    Reached(GameOutcome),
    /// Movement is disabled after the goal is reached.
    Finished,
}

/// A player walking a generated maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRun {
    maze: Maze,
    player: (usize, usize),
    steps: u32,
    won: bool,
}

impl MazeRun {
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self::from_maze(Maze::generate(size, rng))
    }

    #[must_use]
    pub const fn from_maze(maze: Maze) -> Self {
        Self {
            maze,
            player: (0, 0),
            steps: 0,
            won: false,
        }
    }

    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    #[must_use]
    pub const fn player(&self) -> (usize, usize) {
        self.player
    }

    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    pub fn try_move(&mut self, dir: Direction) -> MoveResult {
        if self.won {
            return MoveResult::Finished;
        }
        let Some(next) = self.maze.step(self.player, dir) else {
            return MoveResult::Blocked;
        };
        self.player = next;
        self.steps += 1;
        if next == self.maze.goal() {
            self.won = true;
            MoveResult::Reached(GameOutcome::walked(self.steps))
        } else {
            MoveResult::Moved
        }
    }
}

impl MiniGame for MazeRun {
    fn is_won(&self) -> bool {
        self.won
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.won.then(|| GameOutcome::walked(self.steps))
    }
}
