#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake engine.
//!
//! This crate defines the value types that connect the authoritative world,
//! the render sink, and the input sources: grid coordinates and directions,
//! the closed cell taxonomy, the deferred [`Command`] enum interpreted during
//! each tick's flush, the named [`InputEvent`] set, and the error taxonomy.
//! Everything here is plain serializable data; behavior lives in the world
//! crate.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use thiserror::Error;

/// Headline shown on the game-over screen.
pub const GAME_OVER_HEADLINE: &str = "Game Over!";

/// Immutable 2D integer coordinate used for board positions and offsets.
///
/// Equality and hashing are structural, so vectors serve directly as map
/// keys. There is no interning; two vectors with equal components are
/// interchangeable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GridVector {
    x: i32,
    y: i32,
}

impl GridVector {
    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Component-wise sum of two vectors.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Scales the vector by an integer factor.
    #[must_use]
    pub const fn times(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Dot product of two vectors.
    #[must_use]
    pub const fn dot(self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// Reports whether the two vectors are perpendicular (dot product zero).
    #[must_use]
    pub const fn is_perpendicular_to(self, other: Self) -> bool {
        self.dot(other) == 0
    }
}

impl Add for GridVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.plus(other)
    }
}

/// Cardinal movement directions available to the snake.
///
/// The board uses screen coordinates: `y` grows downward, so [`Direction::North`]
/// points toward decreasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward increasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// All four cardinal directions, in a fixed order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset applied to a position when moving in this direction.
    #[must_use]
    pub const fn offset(self) -> GridVector {
        match self {
            Self::North => GridVector::new(0, -1),
            Self::East => GridVector::new(1, 0),
            Self::South => GridVector::new(0, 1),
            Self::West => GridVector::new(-1, 0),
        }
    }

    /// Reports whether this direction is perpendicular to `other`.
    ///
    /// A direction is never perpendicular to itself or to its reverse, which
    /// is exactly the rule that forbids a 180° turn into the snake's own neck.
    #[must_use]
    pub const fn is_perpendicular_to(self, other: Self) -> bool {
        self.offset().is_perpendicular_to(other.offset())
    }
}

/// Closed taxonomy of board cell contents.
///
/// The board stores only non-empty cells keyed by position; a position absent
/// from the board's map is implicitly [`Cell::Empty`]. Cell values therefore
/// do not carry their own position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Vacant cell. Always safe; touching it does nothing.
    #[default]
    Empty,
    /// Impassable wall. Never safe; the collision itself is detected by the
    /// state machine, so touching a wall is still a no-op.
    Wall,
    /// Edible apple. Always safe; touching it schedules the deferred commands
    /// that replace the apple, award points, and grow the snake.
    Apple {
        /// Points awarded when the apple is eaten.
        points: i64,
        /// Growth steps granted when the apple is eaten.
        growth: u32,
    },
}

impl Cell {
    /// Reports whether the snake may rest on this cell without ending the game.
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Reports whether the cell is a wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Reports whether the cell holds an apple.
    #[must_use]
    pub const fn is_apple(&self) -> bool {
        matches!(self, Self::Apple { .. })
    }

    /// Reports whether the cell is vacant.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Named input events delivered by input sources.
///
/// Raw key codes never cross into the engine; adapters translate whatever
/// device they read into these events, yielding `Option<InputEvent>` so that
/// unmapped input (`None`, the no-op sentinel) is never queued at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Steer the snake north. Applies only during unpaused, non-terminal play.
    MoveUp,
    /// Steer the snake south. Applies only during unpaused, non-terminal play.
    MoveDown,
    /// Steer the snake west. Applies only during unpaused, non-terminal play.
    MoveLeft,
    /// Steer the snake east. Applies only during unpaused, non-terminal play.
    MoveRight,
    /// Pause or unpause. Applies whenever the game is not done.
    TogglePaused,
    /// Start a fresh game. Applies only while the game-over screen is showing.
    PlayAgain,
    /// Quit the game unconditionally.
    QuitGame,
}

impl InputEvent {
    /// Direction requested by a movement event, if this is one.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::North),
            Self::MoveDown => Some(Direction::South),
            Self::MoveLeft => Some(Direction::West),
            Self::MoveRight => Some(Direction::East),
            Self::TogglePaused | Self::PlayAgain | Self::QuitGame => None,
        }
    }
}

/// Deferred state mutations scheduled during touch dispatch.
///
/// Touching a cell never mutates the board directly; it enqueues commands
/// that a single interpreter applies later in the same tick, in enqueue
/// order, so no handler ever reads a half-updated board. The enum is plain
/// data, which keeps the queue serializable and the interpreter trivially
/// testable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Clears the cell at the given position back to empty.
    RemoveCell {
        /// Board position to clear.
        position: GridVector,
    },
    /// Places a fresh apple on a random empty cell, carrying the same
    /// point and growth values as the apple it replaces.
    SpawnApple {
        /// Points the new apple will be worth.
        points: i64,
        /// Growth steps the new apple will grant.
        growth: u32,
    },
    /// Adds points to the score.
    AddScore {
        /// Amount of points to add.
        points: i64,
    },
    /// Extends the snake's growth counter.
    GrowSnake {
        /// Number of growth steps to add.
        steps: u32,
    },
    /// Counts one apple toward the current level's goal.
    ConsumeApple,
}

/// A position was handed to a bounds-checked board accessor while lying
/// outside the grid.
///
/// This is always a programming error in the caller; the engine never
/// produces it during a well-formed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("position {position:?} is outside the {width}x{height} board")]
pub struct OutOfBounds {
    /// The offending position.
    pub position: GridVector,
    /// Width of the board that rejected the position.
    pub width: i32,
    /// Height of the board that rejected the position.
    pub height: i32,
}

/// Failures when seeding a game's initial placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The search exhausted its retry budget without finding a spawn that
    /// survives the safety lookahead; the board has no safe placement.
    #[error("no safe snake spawn found after {attempts} attempts")]
    NoSafeSpawn {
        /// Number of candidate tails that were sampled before giving up.
        attempts: u32,
    },
    /// The configured board has no area to place anything on.
    #[error("board dimensions {width}x{height} must be at least 1x1")]
    InvalidDimensions {
        /// Configured board width.
        width: i32,
        /// Configured board height.
        height: i32,
    },
}
