use crate::types::{Coordinates, TileColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub color: TileColor,
    pub destroyed: bool,
}

/// Owned copy of a board, detached from any lock
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, bottom row first
    pub tiles: Vec<TileSnapshot>,
    pub game_over: bool,
}

impl BoardSnapshot {
    pub fn get(&self, at: Coordinates) -> Option<TileSnapshot> {
        if at.x < 0 || at.y < 0 || at.x as usize >= self.width || at.y as usize >= self.height {
            return None;
        }
        self.tiles.get(at.y as usize * self.width + at.x as usize).copied()
    }

    /// Rows from the bottom (`y == 0`) up
    pub fn rows(&self) -> impl Iterator<Item = &[TileSnapshot]> + '_ {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn destroyed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.destroyed).count()
    }
}
