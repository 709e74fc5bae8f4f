//! Core board logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules. It has **no** knowledge of locks,
//! threads, timers or networking: every operation takes the board and, where
//! time matters, an explicit `now`, which keeps it:
//!
//! - **Deterministic**: Same seed and same timestamps produce identical boards
//! - **Testable**: Rules are plain functions over [`Board`]
//! - **Portable**: The engine decides how the board is shared
//!
//! # Module Structure
//!
//! - [`board`]: Tile grid, geometry queries and board generation
//! - [`matcher`]: Row/column run detection and the game-over heuristic
//! - [`moves`]: Move validation and swapping
//! - [`cleanup`]: Grace-period bookkeeping for destroyed tiles
//! - [`rng`]: Deterministic color generation
//! - [`snapshot`]: Owned board copies for observers
//!
//! # Tile Lifecycle
//!
//! 1. A tile is generated with a playable color
//! 2. When it joins a run of three or more it is stamped `destroyed_at = now`
//! 3. While destroyed it cannot be swapped
//! 4. Once the grace period has strictly elapsed it is cleared to `Empty`
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tile_smash_core::cleanup::{clean_up, tiles_to_clean_up, CleanupDelay};
//! use tile_smash_core::matcher::mark_destroyed_tiles;
//! use tile_smash_core::moves::apply_move;
//! use tile_smash_core::Board;
//! use tile_smash_types::{Coordinates, Direction, Move, TileColor::*};
//!
//! let mut board = Board::from_rows(vec![vec![Red, Red, Blue, Red]]).unwrap();
//! apply_move(&mut board, Move::new(Coordinates::new(3, 0), Direction::Left));
//!
//! let t0 = Instant::now();
//! assert_eq!(mark_destroyed_tiles(&mut board, t0), 3);
//!
//! let grace = CleanupDelay::After(Duration::from_millis(1500));
//! let due = tiles_to_clean_up(&board, t0 + Duration::from_secs(2), grace);
//! clean_up(&mut board, &due);
//! assert_eq!(board.count_empty(), 3);
//! ```

pub mod board;
pub mod cleanup;
pub mod error;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod snapshot;

pub use tile_smash_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use cleanup::{clean_up, tiles_to_clean_up, CleanupDelay};
pub use error::CoreError;
pub use matcher::{find_matches, is_game_over, mark_destroyed_tiles};
pub use moves::{apply_move, is_move_valid, parse_direction, MoveOutcome};
pub use rng::{ColorSource, CyclicColors, SimpleRng};
pub use snapshot::{BoardSnapshot, TileSnapshot};
