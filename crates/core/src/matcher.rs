//! Match detection
//!
//! Scans every row left-to-right and every column bottom-to-top for runs of
//! at least [`MATCH_THRESHOLD`] tiles of the same color. Matching tiles are
//! stamped as destroyed; clearing them is left to [`crate::cleanup`].

use std::time::Instant;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Coordinates, TileColor, MATCH_THRESHOLD};

/// Which way a scan line runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// One line per row, walking x upwards
    Rows,
    /// One line per column, walking y upwards
    Columns,
}

/// Running state for a single scan line
struct RunTracker {
    color: TileColor,
    count: usize,
    /// Tiles of the current run seen before it reached the threshold
    potential: ArrayVec<Coordinates, { MATCH_THRESHOLD - 1 }>,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            color: TileColor::Empty,
            count: 0,
            potential: ArrayVec::new(),
        }
    }

    fn visit(&mut self, at: Coordinates, color: TileColor, confirmed: &mut Vec<Coordinates>) {
        if color.is_empty() {
            // Nothing to destroy, but the next tile cannot continue the run.
            self.color = TileColor::Empty;
            return;
        }

        if color == self.color {
            self.count += 1;
            if self.count < MATCH_THRESHOLD {
                self.potential.push(at);
            } else {
                confirmed.extend(self.potential.drain(..));
                confirmed.push(at);
            }
        } else {
            self.color = color;
            self.count = 1;
            self.potential.clear();
            self.potential.push(at);
        }
    }
}

fn scan(board: &Board, axis: Axis, confirmed: &mut Vec<Coordinates>) {
    let (lines, len) = match axis {
        Axis::Rows => (board.height(), board.width()),
        Axis::Columns => (board.width(), board.height()),
    };

    for a in 0..lines as i32 {
        let mut run = RunTracker::new();
        for b in 0..len as i32 {
            let at = match axis {
                Axis::Rows => Coordinates::new(b, a),
                Axis::Columns => Coordinates::new(a, b),
            };
            if let Some(color) = board.color(at) {
                run.visit(at, color, confirmed);
            }
        }
    }
}

/// Coordinates of every tile that belongs to a horizontal or vertical run
///
/// Sorted and free of duplicates (a tile can sit in both a row and a column run).
pub fn find_matches(board: &Board) -> Vec<Coordinates> {
    let mut confirmed = Vec::new();
    scan(board, Axis::Rows, &mut confirmed);
    scan(board, Axis::Columns, &mut confirmed);
    confirmed.sort_unstable();
    confirmed.dedup();
    confirmed
}

/// Stamp `destroyed_at = now` on every matched tile that is not already destroyed
///
/// Already-destroyed tiles keep their first timestamp so the grace period
/// does not restart. Returns the number of newly destroyed tiles.
pub fn mark_destroyed_tiles(board: &mut Board, now: Instant) -> usize {
    let matched = find_matches(board);
    let mut stamped = 0;
    for at in matched {
        if let Some(tile) = board.tile_mut(at) {
            if tile.destroy(now) {
                stamped += 1;
            }
        }
    }
    stamped
}

/// True when no color has enough tiles left to ever form a match
///
/// This only counts tiles per color across the whole board; it does not check
/// whether those tiles could actually be brought into line.
pub fn is_game_over(board: &Board) -> bool {
    let mut counts = [0usize; TileColor::PLAYABLE.len() + 1];
    for (_, tile) in board.tiles() {
        counts[tile.color().index()] += 1;
    }
    TileColor::PLAYABLE
        .iter()
        .all(|c| counts[c.index()] < MATCH_THRESHOLD)
}
