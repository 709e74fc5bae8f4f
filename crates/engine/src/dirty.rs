//! Dirty tracking and the engine wake side-channel
//!
//! The engine idles on a timer. Anything that wants it to run sooner cancels
//! the current wake token; the engine re-arms a fresh token before each pass,
//! so a token is consumed at most once and a wake during a pass is never lost.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::lock::BoardWriteGuard;

#[derive(Debug)]
struct DirtyState {
    /// Board changed outside the engine and has not been broadcast yet
    dirty: bool,
    wake: CancellationToken,
}

#[derive(Debug)]
pub struct DirtyTracker {
    state: Mutex<DirtyState>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DirtyState {
                dirty: false,
                wake: CancellationToken::new(),
            }),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// Flag an unbroadcast board change and wake the engine
    ///
    /// Takes the write guard as proof that the caller holds the board lock.
    pub fn mark_dirty(&self, _board: &BoardWriteGuard<'_>) {
        let mut state = self.state.lock();
        state.dirty = true;
        state.wake.cancel();
    }

    /// Clear the dirty flag, returning whether it was set
    pub fn take_dirty(&self, _board: &BoardWriteGuard<'_>) -> bool {
        std::mem::take(&mut self.state.lock().dirty)
    }

    /// Cut the engine's current idle wait short
    pub fn wake(&self) {
        self.state.lock().wake.cancel();
    }

    /// Token for the next idle wait, replaced first if already consumed
    pub fn arm(&self) -> CancellationToken {
        let mut state = self.state.lock();
        if state.wake.is_cancelled() {
            state.wake = CancellationToken::new();
        }
        state.wake.clone()
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
