//! Board module - owns the tile grid
//!
//! The board is a `width x height` grid stored as a flat row-major vector
//! (`y * width + x`). Row 0 is the bottom row.
//!
//! Only code holding `&mut Board` can change a tile, so whoever hands out the
//! board (the engine's lock) decides who may mutate it.

use std::time::Instant;

use crate::cleanup::{self, CleanupDelay};
use crate::error::CoreError;
use crate::matcher;
use crate::rng::ColorSource;
use crate::snapshot::{BoardSnapshot, TileSnapshot};
use crate::types::{Coordinates, TileColor, MAX_BOARD_CELLS, MAX_GENERATION_PASSES};

/// A single cell
///
/// `destroyed_at` is set when the tile becomes part of a match and cleared when
/// the tile is cleaned up. An `Empty` tile is never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    color: TileColor,
    destroyed_at: Option<Instant>,
}

impl Tile {
    pub fn new(color: TileColor) -> Self {
        Self {
            color,
            destroyed_at: None,
        }
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn destroyed_at(&self) -> Option<Instant> {
        self.destroyed_at
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed_at.is_some()
    }

    /// Stamp the destruction time; returns false if already destroyed or empty
    pub(crate) fn destroy(&mut self, now: Instant) -> bool {
        if self.is_destroyed() || self.color.is_empty() {
            return false;
        }
        self.destroyed_at = Some(now);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.color = TileColor::Empty;
        self.destroyed_at = None;
    }
}

/// Cell count for a `width x height` board
///
/// Rejects empty boards and anything above [`MAX_BOARD_CELLS`], so coordinates
/// and indices always fit in `i32`.
fn checked_cells(width: usize, height: usize) -> Result<usize, CoreError> {
    width
        .checked_mul(height)
        .filter(|&cells| cells > 0 && cells <= MAX_BOARD_CELLS)
        .ok_or(CoreError::InvalidDimensions { width, height })
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    /// Row-major tiles, `y * width + x`
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an all-empty board
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        let cells = checked_cells(width, height)?;
        Ok(Self {
            width,
            tiles: vec![Tile::default(); cells],
        })
    }

    /// Build a board from rows of colors; `rows[0]` is the bottom row (`y == 0`)
    pub fn from_rows(rows: Vec<Vec<TileColor>>) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        checked_cells(width, height)?;
        if rows.iter().any(|r| r.len() != width) {
            return Err(CoreError::RaggedRows);
        }

        let tiles = rows.into_iter().flatten().map(Tile::new).collect();
        Ok(Self { width, tiles })
    }

    /// Generate a fresh board with no empty cells and no pre-existing matches
    ///
    /// Every cell is filled from `colors`; then empty cells are refilled, matches
    /// marked and cleared immediately, until a pass leaves nothing empty.
    pub fn generate<C>(
        width: usize,
        height: usize,
        colors: &mut C,
        now: Instant,
    ) -> Result<Self, CoreError>
    where
        C: ColorSource + ?Sized,
    {
        let mut board = Self::new(width, height)?;

        for _ in 0..MAX_GENERATION_PASSES {
            for tile in board.tiles.iter_mut().filter(|t| t.color.is_empty()) {
                *tile = Tile::new(colors.next_color());
            }

            matcher::mark_destroyed_tiles(&mut board, now);
            let matched = cleanup::tiles_to_clean_up(&board, now, CleanupDelay::Skip);
            cleanup::clean_up(&mut board, &matched);

            if board.count_empty() == 0 {
                return Ok(board);
            }
        }

        Err(CoreError::GenerationExhausted {
            passes: MAX_GENERATION_PASSES,
        })
    }

    #[inline(always)]
    fn index(&self, at: Coordinates) -> Option<usize> {
        if !self.contains(at) {
            return None;
        }
        Some(at.y as usize * self.width + at.x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Height is derived from the grid
    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    pub fn contains(&self, at: Coordinates) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as usize) < self.width && (at.y as usize) < self.height()
    }

    pub fn tile(&self, at: Coordinates) -> Option<&Tile> {
        self.index(at).map(|idx| &self.tiles[idx])
    }

    pub(crate) fn tile_mut(&mut self, at: Coordinates) -> Option<&mut Tile> {
        self.index(at).map(move |idx| &mut self.tiles[idx])
    }

    /// Color at position, `None` if out of bounds
    pub fn color(&self, at: Coordinates) -> Option<TileColor> {
        self.tile(at).map(Tile::color)
    }

    /// Overwrite a cell with a fresh, non-destroyed tile
    /// Returns false if out of bounds
    pub fn set_color(&mut self, at: Coordinates, color: TileColor) -> bool {
        match self.tile_mut(at) {
            Some(tile) => {
                *tile = Tile::new(color);
                true
            }
            None => false,
        }
    }

    /// Exchange two tiles (color and destruction state travel together)
    /// Returns false if either position is out of bounds
    pub fn swap(&mut self, a: Coordinates, b: Coordinates) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.tiles.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// All tiles in row-major order, bottom row first
    pub fn tiles(&self) -> impl Iterator<Item = (Coordinates, &Tile)> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            let at = Coordinates::new((idx % width) as i32, (idx / width) as i32);
            (at, tile)
        })
    }

    pub fn count_empty(&self) -> usize {
        self.tiles.iter().filter(|t| t.color.is_empty()).count()
    }

    pub fn count_destroyed(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_destroyed()).count()
    }

    /// Value copy suitable for handing to the transport layer
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height(),
            tiles: self
                .tiles
                .iter()
                .map(|t| TileSnapshot {
                    color: t.color,
                    destroyed: t.is_destroyed(),
                })
                .collect(),
            game_over: matcher::is_game_over(self),
        }
    }
}
