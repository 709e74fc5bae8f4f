//! Engine - the background tick loop
//!
//! Each pass:
//!
//! 1. drain the move queue
//! 2. under an upgradable read lock, find destroyed tiles past their grace period
//! 3. with no moves, nothing to clear and nothing dirty, return to idle
//!    without touching the board or notifying anyone
//! 4. otherwise upgrade to the write lock, clear expired tiles, apply the moves
//!    in order, and re-run match detection
//! 5. release the lock and notify the observer once if anything changed
//!
//! Between passes the loop waits for the tick interval, a wake signal from
//! [`DirtyTracker`](crate::dirty::DirtyTracker), or shutdown, whichever
//! comes first.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::context::GameContext;
use crate::core::{
    apply_move, clean_up, mark_destroyed_tiles, tiles_to_clean_up, BoardSnapshot, CleanupDelay,
    MoveOutcome,
};

/// Receives the board after every pass that changed it
///
/// Implementations are called outside the board lock and must not block for long.
pub trait BoardObserver: Send + Sync {
    fn board_changed(&self, snapshot: &BoardSnapshot);
}

impl<F> BoardObserver for F
where
    F: Fn(&BoardSnapshot) + Send + Sync,
{
    fn board_changed(&self, snapshot: &BoardSnapshot) {
        self(snapshot)
    }
}

/// What one pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub moves_applied: usize,
    pub moves_dropped: usize,
    pub tiles_cleared: usize,
    pub tiles_destroyed: usize,
    /// Board was replaced outside the engine (new game)
    pub forced: bool,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do; the write lock was never taken
    Idle,
    /// Work was attempted but the board ended up unchanged
    Unchanged(PassSummary),
    /// Board differs from before the pass and the observer was notified
    Changed(PassSummary),
}

pub struct Engine {
    ctx: Arc<GameContext>,
    observer: Arc<dyn BoardObserver>,
}

impl Engine {
    pub fn new(ctx: Arc<GameContext>, observer: Arc<dyn BoardObserver>) -> Self {
        Self { ctx, observer }
    }

    pub fn context(&self) -> &Arc<GameContext> {
        &self.ctx
    }

    /// Run one pass
    pub fn tick(&self) -> TickOutcome {
        let ctx = &self.ctx;
        let now = ctx.clock().now();
        let moves = ctx.queue().dequeue_all();
        let delay = CleanupDelay::After(ctx.config().destroy_delay);

        let board = ctx.board().upgradable_read();
        let expired = tiles_to_clean_up(&board, now, delay);
        if moves.is_empty() && expired.is_empty() && !ctx.dirty().is_dirty() {
            return TickOutcome::Idle;
        }

        let mut board = board.upgrade();
        let mut summary = PassSummary {
            forced: ctx.dirty().take_dirty(&board),
            ..PassSummary::default()
        };

        summary.tiles_cleared = clean_up(&mut board, &expired);

        // Swaps can cancel out or exchange equal tiles, so moves alone prove nothing.
        let before_moves = (!moves.is_empty()).then(|| (*board).clone());
        for mv in &moves {
            match apply_move(&mut board, *mv) {
                MoveOutcome::Swapped => summary.moves_applied += 1,
                outcome => {
                    summary.moves_dropped += 1;
                    debug!(
                        x = mv.source.x,
                        y = mv.source.y,
                        direction = mv.direction.as_str(),
                        ?outcome,
                        "move ignored"
                    );
                }
            }
        }

        summary.tiles_destroyed = mark_destroyed_tiles(&mut board, now);

        let moved = before_moves.is_some_and(|before| before != *board);
        let changed =
            summary.forced || moved || summary.tiles_cleared > 0 || summary.tiles_destroyed > 0;
        if !changed {
            return TickOutcome::Unchanged(summary);
        }

        let snapshot = board.snapshot();
        drop(board);

        debug!(?summary, "board changed");
        self.observer.board_changed(&snapshot);
        TickOutcome::Changed(summary)
    }

    /// Tick until `shutdown` is cancelled
    ///
    /// The board was generated when the context was built, so the loop starts
    /// processing immediately.
    pub async fn run(self, shutdown: CancellationToken) {
        let interval = self.ctx.config().tick_interval;
        info!(interval_ms = interval.as_millis() as u64, "engine started");

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            // Armed before the pass so a wake arriving mid-pass ends the next wait early.
            let wake = self.ctx.dirty().arm();
            self.tick();

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = wake.cancelled() => {}
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("engine stopped");
    }
}
