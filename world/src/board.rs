//! Mutable cell grid plus the safe initial placement search.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use snake_core::{Cell, Direction, GridVector, OutOfBounds, PlacementError};

use crate::snake::Snake;

/// Retry budget for randomized placement searches. A board with no safe
/// spawn (fully walled, say) fails loudly instead of looping forever.
pub(crate) const MAX_SPAWN_ATTEMPTS: u32 = 1024;

/// The game board: a fixed-size grid holding the non-empty cells.
///
/// Positions absent from the cell map are implicitly [`Cell::Empty`]. The
/// board is the one genuinely mutable entity in the model; it is owned by
/// the current game state and mutated only while the deferred-command queue
/// flushes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: HashMap<GridVector, Cell>,
}

impl Board {
    /// Creates a board of the given dimensions seeded with walls.
    ///
    /// `width` and `height` must be at least 1. Wall positions outside the
    /// grid are ignored.
    #[must_use]
    pub fn new(width: i32, height: i32, walls: impl IntoIterator<Item = GridVector>) -> Self {
        debug_assert!(width >= 1 && height >= 1, "board must have positive area");
        let mut board = Self {
            width,
            height,
            cells: HashMap::new(),
        };
        for position in walls {
            let _ = board.put(position, Cell::Wall);
        }
        board
    }

    /// Positions forming the rectangular perimeter of a grid of the given
    /// size; used to seed new boards.
    #[must_use]
    pub fn bounding_walls(width: i32, height: i32) -> HashSet<GridVector> {
        let mut walls = HashSet::new();
        for x in 0..width {
            let _ = walls.insert(GridVector::new(x, 0));
            let _ = walls.insert(GridVector::new(x, height - 1));
        }
        for y in 1..height - 1 {
            let _ = walls.insert(GridVector::new(0, y));
            let _ = walls.insert(GridVector::new(width - 1, y));
        }
        walls
    }

    /// Width of the board in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the board in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the position lies within the grid.
    #[must_use]
    pub const fn in_bounds(&self, position: GridVector) -> bool {
        0 <= position.x() && position.x() < self.width && 0 <= position.y() && position.y() < self.height
    }

    fn bounds_checked(&self, position: GridVector) -> Result<GridVector, OutOfBounds> {
        if self.in_bounds(position) {
            Ok(position)
        } else {
            Err(OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cell at the given position.
    ///
    /// Positions without an entry read as [`Cell::Empty`]. Out-of-bounds
    /// positions are a caller bug and fail with [`OutOfBounds`].
    pub fn cell(&self, position: GridVector) -> Result<Cell, OutOfBounds> {
        let position = self.bounds_checked(position)?;
        Ok(self.cells.get(&position).copied().unwrap_or_default())
    }

    /// Places a cell, with the same bounds contract as [`Board::cell`].
    ///
    /// Putting [`Cell::Empty`] degrades to removal, preserving the invariant
    /// that only non-empty cells occupy the map.
    pub fn put(&mut self, position: GridVector, cell: Cell) -> Result<(), OutOfBounds> {
        let position = self.bounds_checked(position)?;
        if cell.is_empty() {
            let _ = self.cells.remove(&position);
        } else {
            let _ = self.cells.insert(position, cell);
        }
        Ok(())
    }

    /// Clears the cell at the given position back to empty.
    pub fn remove(&mut self, position: GridVector) -> Result<(), OutOfBounds> {
        let position = self.bounds_checked(position)?;
        let _ = self.cells.remove(&position);
        Ok(())
    }

    /// Reports whether the position holds a wall. False for any
    /// out-of-bounds position; never errors.
    #[must_use]
    pub fn is_wall(&self, position: GridVector) -> bool {
        self.cell(position).is_ok_and(|cell| cell.is_wall())
    }

    /// Reports whether the position is an in-bounds empty cell. False for
    /// any out-of-bounds position; never errors.
    #[must_use]
    pub fn is_empty_cell(&self, position: GridVector) -> bool {
        self.cell(position).is_ok_and(|cell| cell.is_empty())
    }

    /// Uniformly random position over the full grid, occupied cells
    /// included; callers filter for what they need.
    #[must_use]
    pub fn random_position(&self, rng: &mut impl Rng) -> GridVector {
        GridVector::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Iterates over the non-empty cells together with their positions.
    pub fn occupied(&self) -> impl Iterator<Item = (GridVector, Cell)> + '_ {
        self.cells.iter().map(|(position, cell)| (*position, *cell))
    }

    /// Number of apples currently on the board.
    #[must_use]
    pub fn apple_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.is_apple()).count()
    }

    /// Searches for a two-segment snake that cannot immediately crash.
    ///
    /// Repeatedly samples a random empty cell as a candidate tail and builds
    /// the four cardinal head-plus-tail candidates around it. A candidate is
    /// safe when simulating `lookahead` straight-line moves never produces a
    /// game-over configuration (head out of bounds, head on a wall, or
    /// self-collision). The first sampled tail with at least one safe
    /// candidate wins, and the result is chosen uniformly among that tail's
    /// safe candidates. Naive random placement next to a wall would end the
    /// game within a move or two; the lookahead rules that out.
    ///
    /// Fails with [`PlacementError::NoSafeSpawn`] once the retry budget is
    /// exhausted, which happens only on degenerate boards.
    pub fn baby_snake(
        &self,
        rng: &mut impl Rng,
        lookahead: u32,
    ) -> Result<Snake, PlacementError> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let tail = self.random_position(rng);
            if !self.is_empty_cell(tail) {
                continue;
            }
            let safe: Vec<Snake> = Direction::ALL
                .iter()
                .map(|&direction| Snake::baby(direction, tail.plus(direction.offset()), tail))
                .filter(|candidate| self.survives_lookahead(candidate, lookahead))
                .collect();
            if !safe.is_empty() {
                return Ok(safe[rng.gen_range(0..safe.len())].clone());
            }
        }
        Err(PlacementError::NoSafeSpawn {
            attempts: MAX_SPAWN_ATTEMPTS,
        })
    }

    fn survives_lookahead(&self, candidate: &Snake, lookahead: u32) -> bool {
        candidate.moves(lookahead).all(|snake| {
            self.in_bounds(snake.head())
                && !self.is_wall(snake.head())
                && !snake.is_crashed_into_self()
        })
    }
}
