//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used by the board logic, the engine and the wire protocol alike.
//!
//! # Coordinates
//!
//! - `x` indexes the column (0 = leftmost)
//! - `y` indexes the row (0 = bottom row)
//! - `Up` moves towards larger `y`, `Down` towards smaller `y`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Idle interval between engine passes |
//! | `DESTROY_DELAY_MS` | 1500 | Grace period before a destroyed tile is cleared |
//!
//! # Examples
//!
//! ```
//! use tile_smash_types::{Coordinates, Direction, Move, TileColor};
//!
//! let color = TileColor::from_str("Red").unwrap();
//! assert_eq!(color, TileColor::Red);
//!
//! let mv = Move::new(Coordinates::new(2, 3), Direction::from_str("up").unwrap());
//! assert_eq!(mv.target(), Coordinates::new(2, 4));
//! ```

/// Minimum run length that destroys tiles
pub const MATCH_THRESHOLD: usize = 3;

/// Default board width in columns
pub const DEFAULT_BOARD_WIDTH: usize = 8;

/// Default board height in rows
pub const DEFAULT_BOARD_HEIGHT: usize = 8;

/// Idle interval between engine passes (1000ms)
pub const TICK_MS: u64 = 1000;

/// Grace period between a tile being destroyed and being cleared (1500ms)
pub const DESTROY_DELAY_MS: u64 = 1500;

/// Upper bound on refill/match/clear passes while generating a board
pub const MAX_GENERATION_PASSES: usize = 1000;

/// Largest board accepted, in cells; keeps every index within `i32`
pub const MAX_BOARD_CELLS: usize = 1 << 20;


/// Tile colors
///
/// `Empty` is the terminal state of a cleared cell and never takes part in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TileColor {
    #[default]
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl TileColor {
    /// Every color a tile can be generated with
    pub const PLAYABLE: [TileColor; 6] = [
        TileColor::Red,
        TileColor::Green,
        TileColor::Blue,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_smash_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("blue"), Some(TileColor::Blue));
    /// assert_eq!(TileColor::from_str("EMPTY"), Some(TileColor::Empty));
    /// assert_eq!(TileColor::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Some(TileColor::Empty),
            "red" => Some(TileColor::Red),
            "green" => Some(TileColor::Green),
            "blue" => Some(TileColor::Blue),
            "yellow" => Some(TileColor::Yellow),
            "purple" => Some(TileColor::Purple),
            "orange" => Some(TileColor::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Empty => "empty",
            TileColor::Red => "red",
            TileColor::Green => "green",
            TileColor::Blue => "blue",
            TileColor::Yellow => "yellow",
            TileColor::Purple => "purple",
            TileColor::Orange => "orange",
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, TileColor::Empty)
    }

    /// Dense index, `Empty` is 0
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Swap direction, relative to the source tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Unknown text yields `None`; callers must reject it rather than pick a default.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_smash_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("Left"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Column/row offset of the target tile
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Board position: `x` is the column, `y` the row (0 = bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring position in `direction` (may lie off the board)
    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A request to swap the tile at `source` with its neighbour in `direction`
///
/// Moves are transient: built by a caller, consumed by the engine within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Coordinates,
    pub direction: Direction,
}

impl Move {
    pub fn new(source: Coordinates, direction: Direction) -> Self {
        Self { source, direction }
    }

    pub fn target(&self) -> Coordinates {
        self.source.offset(self.direction)
    }

    /// The move that undoes this one when applied right after it
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target(),
            direction: self.direction.opposite(),
        }
    }
}
