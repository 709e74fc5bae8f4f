//! Shared game context - the state every caller and the engine work against
//!
//! Connection handlers call [`GameContext::get_board`],
//! [`GameContext::start_new_game`] and [`GameContext::submit_move`]
//! concurrently with the engine loop. All methods are synchronous and hold a
//! lock only for the duration of the call, so they are safe to use from async
//! tasks as long as no guard is kept across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::core::{is_move_valid, parse_direction, Board, BoardSnapshot, CoreError, SimpleRng};
use crate::dirty::DirtyTracker;
use crate::lock::BoardLock;
use crate::queue::MoveQueue;
use crate::types::{Coordinates, Move};

pub struct GameContext {
    board: BoardLock,
    queue: MoveQueue,
    dirty: DirtyTracker,
    clock: Arc<dyn Clock>,
    rng: Mutex<SimpleRng>,
    config: EngineConfig,
}

impl GameContext {
    /// Context around a freshly generated board
    ///
    /// The board is complete before the context exists, so no caller can
    /// observe a partially initialized grid. Generation failure is returned here.
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let mut rng = SimpleRng::new(config.seed);
        let board = Board::generate(config.width, config.height, &mut rng, clock.now())?;
        info!(
            width = config.width,
            height = config.height,
            "board initialized"
        );
        Ok(Self::assemble(config, clock, board, rng))
    }

    /// Context around an existing board
    pub fn with_board(config: EngineConfig, clock: Arc<dyn Clock>, board: Board) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::assemble(config, clock, board, rng)
    }

    fn assemble(config: EngineConfig, clock: Arc<dyn Clock>, board: Board, rng: SimpleRng) -> Self {
        Self {
            board: BoardLock::new(board),
            queue: MoveQueue::new(),
            dirty: DirtyTracker::new(),
            clock,
            rng: Mutex::new(rng),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardLock {
        &self.board
    }

    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Copy of the current board
    pub fn get_board(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    fn generate(&self) -> Result<Board, CoreError> {
        let mut rng = self.rng.lock();
        Board::generate(
            self.config.width,
            self.config.height,
            &mut *rng,
            self.clock.now(),
        )
    }

    /// Re-seed the board and have the engine push it on its next pass
    pub fn start_new_game(&self) -> Result<(), CoreError> {
        // Generation runs outside the lock; only the swap is exclusive.
        let board = self.generate()?;
        let mut guard = self.board.write();
        guard.replace(board);
        self.dirty.mark_dirty(&guard);
        drop(guard);
        info!("new game started");
        Ok(())
    }

    /// Validate against the current board and queue the move
    ///
    /// Returns false when the move was dropped. Dropping is not an error.
    pub fn submit_move(&self, mv: Move) -> bool {
        let valid = is_move_valid(&self.board.read(), mv.source, mv.direction);
        if !valid {
            debug!(x = mv.source.x, y = mv.source.y, direction = mv.direction.as_str(), "move dropped");
            return false;
        }
        self.queue.enqueue(mv);
        self.dirty.wake();
        true
    }

    /// Same as [`submit_move`](Self::submit_move) for a direction still in wire form
    ///
    /// An unknown direction fails the call; it is never mapped to a default.
    pub fn submit_raw_move(&self, x: i32, y: i32, direction: &str) -> Result<bool, CoreError> {
        let direction = parse_direction(direction)?;
        Ok(self.submit_move(Move::new(Coordinates::new(x, y), direction)))
    }
}
