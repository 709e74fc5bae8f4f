//! Move queue - buffers moves between engine passes

use std::mem;

use parking_lot::Mutex;

use crate::types::Move;

/// Multi-producer, single-consumer move buffer
///
/// `enqueue` never waits on the engine: the internal mutex is only held for a
/// push or a swap of the backing vector.
#[derive(Debug, Default)]
pub struct MoveQueue {
    pending: Mutex<Vec<Move>>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, mv: Move) {
        self.pending.lock().push(mv);
    }

    /// Take everything queued so far, oldest first
    ///
    /// A move enqueued concurrently lands either in this drain or the next one.
    pub fn dequeue_all(&self) -> Vec<Move> {
        mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
