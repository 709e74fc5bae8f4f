//! Grace period and clearing tests

use std::time::{Duration, Instant};

use tile_smash::core::{
    clean_up, mark_destroyed_tiles, tiles_to_clean_up, Board, CleanupDelay,
};
use tile_smash::types::{Coordinates, TileColor::*};

const DELAY: Duration = Duration::from_millis(1500);

fn destroyed_board(at: Instant) -> Board {
    let mut board = Board::from_rows(vec![vec![Green, Green, Green, Red]]).unwrap();
    assert_eq!(mark_destroyed_tiles(&mut board, at), 3);
    board
}

#[test]
fn test_nothing_expires_inside_grace_period() {
    let start = Instant::now();
    let board = destroyed_board(start);

    assert!(tiles_to_clean_up(&board, start, CleanupDelay::After(DELAY)).is_empty());
    assert!(tiles_to_clean_up(&board, start + DELAY, CleanupDelay::After(DELAY)).is_empty());
}

#[test]
fn test_tiles_expire_strictly_after_delay() {
    let start = Instant::now();
    let board = destroyed_board(start);

    let now = start + DELAY + Duration::from_millis(1);
    let expired = tiles_to_clean_up(&board, now, CleanupDelay::After(DELAY));
    assert_eq!(
        expired,
        vec![
            Coordinates::new(0, 0),
            Coordinates::new(1, 0),
            Coordinates::new(2, 0)
        ]
    );
}

#[test]
fn test_skip_returns_every_destroyed_tile() {
    let start = Instant::now();
    let board = destroyed_board(start);
    assert_eq!(tiles_to_clean_up(&board, start, CleanupDelay::Skip).len(), 3);
}

#[test]
fn test_clean_up_empties_and_clears_stamp() {
    let start = Instant::now();
    let mut board = destroyed_board(start);
    let expired = tiles_to_clean_up(&board, start, CleanupDelay::Skip);

    assert_eq!(clean_up(&mut board, &expired), 3);
    assert_eq!(board.count_empty(), 3);
    assert_eq!(board.count_destroyed(), 0);
    assert_eq!(board.color(Coordinates::new(3, 0)), Some(Red));

    // Second pass finds nothing left.
    assert_eq!(clean_up(&mut board, &expired), 0);
}

#[test]
fn test_clock_behind_stamp_does_not_expire() {
    let start = Instant::now() + Duration::from_secs(10);
    let board = destroyed_board(start);
    assert!(tiles_to_clean_up(&board, Instant::now(), CleanupDelay::After(DELAY)).is_empty());
}
