//! Move validation and application
//!
//! A move swaps the source tile with its neighbour in the given direction.
//! Moves that would leave the board, or touch a tile that is mid-destruction,
//! are no-ops rather than errors.

use crate::board::Board;
use crate::error::CoreError;
use crate::types::{Coordinates, Direction, Move};

/// Result of [`apply_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The two tiles traded places
    Swapped,
    /// Source or target lies outside the current board
    OutOfBounds,
    /// One of the two tiles is destroyed and waiting to be cleared
    Blocked,
}

/// Whether a move starting at `at` stays on the board
///
/// Uses the board's current dimensions, so a move queued before a new game
/// must be checked again when it is applied.
pub fn is_move_valid(board: &Board, at: Coordinates, direction: Direction) -> bool {
    board.contains(at) && board.contains(at.offset(direction))
}

/// Swap the tiles of `mv` unless either is destroyed
pub fn apply_move(board: &mut Board, mv: Move) -> MoveOutcome {
    if !is_move_valid(board, mv.source, mv.direction) {
        return MoveOutcome::OutOfBounds;
    }

    let target = mv.target();
    let blocked = [mv.source, target]
        .iter()
        .any(|&at| board.tile(at).is_some_and(|t| t.is_destroyed()));
    if blocked {
        return MoveOutcome::Blocked;
    }

    board.swap(mv.source, target);
    MoveOutcome::Swapped
}

/// Parse a direction received from a client
///
/// Anything outside up/down/left/right rejects the whole request.
pub fn parse_direction(s: &str) -> Result<Direction, CoreError> {
    Direction::from_str(s).ok_or_else(|| CoreError::UnknownDirection(s.to_string()))
}
