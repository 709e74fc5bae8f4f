//! Destruction scheduling
//!
//! Destroyed tiles stay on the board for a grace period so a front end can
//! animate them, then get cleared to `Empty`.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::types::Coordinates;

/// How long a destroyed tile must wait before it can be cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupDelay {
    /// Eligible once strictly more than this much time has passed
    After(Duration),
    /// Every destroyed tile is eligible immediately (board generation)
    Skip,
}

/// Positions of destroyed tiles whose grace period has run out
pub fn tiles_to_clean_up(board: &Board, now: Instant, delay: CleanupDelay) -> Vec<Coordinates> {
    board
        .tiles()
        .filter_map(|(at, tile)| {
            let destroyed_at = tile.destroyed_at()?;
            let eligible = match delay {
                CleanupDelay::Skip => true,
                CleanupDelay::After(grace) => now.saturating_duration_since(destroyed_at) > grace,
            };
            eligible.then_some(at)
        })
        .collect()
}

/// Clear the listed tiles to `Empty`; returns how many were changed
pub fn clean_up(board: &mut Board, tiles: &[Coordinates]) -> usize {
    let mut cleared = 0;
    for &at in tiles {
        if let Some(tile) = board.tile_mut(at) {
            if !tile.color().is_empty() || tile.is_destroyed() {
                cleared += 1;
            }
            tile.clear();
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::mark_destroyed_tiles;
    use crate::types::TileColor::*;

    #[test]
    fn test_grace_boundary_is_strict() {
        let t0 = Instant::now();
        let grace = Duration::from_millis(1500);
        let mut board = Board::from_rows(vec![vec![Red, Red, Red]]).unwrap();
        mark_destroyed_tiles(&mut board, t0);

        assert!(tiles_to_clean_up(&board, t0 + grace, CleanupDelay::After(grace)).is_empty());
        assert_eq!(
            tiles_to_clean_up(&board, t0 + grace + Duration::from_millis(1), CleanupDelay::After(grace))
                .len(),
            3
        );
    }

    #[test]
    fn test_skip_ignores_clock() {
        let t0 = Instant::now();
        let mut board = Board::from_rows(vec![vec![Blue, Blue, Blue, Red]]).unwrap();
        mark_destroyed_tiles(&mut board, t0);
        assert_eq!(tiles_to_clean_up(&board, t0, CleanupDelay::Skip).len(), 3);
    }

    #[test]
    fn test_clean_up_only_touches_listed_tiles() {
        let t0 = Instant::now();
        let mut board = Board::from_rows(vec![vec![Green, Green, Green, Red]]).unwrap();
        mark_destroyed_tiles(&mut board, t0);

        let cleared = clean_up(&mut board, &[Coordinates::new(0, 0)]);
        assert_eq!(cleared, 1);

        let first = board.tile(Coordinates::new(0, 0)).unwrap();
        assert_eq!(first.color(), Empty);
        assert!(!first.is_destroyed());
        assert!(board.tile(Coordinates::new(1, 0)).unwrap().is_destroyed());
        assert_eq!(board.color(Coordinates::new(3, 0)), Some(Red));
    }
}
