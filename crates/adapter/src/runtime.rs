//! Adapter runtime integration.
//!
//! Bridges the engine's synchronous change notification into the async server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::BoardSnapshot;
use crate::engine::BoardObserver;
use crate::protocol::{create_board, BoardMessage};

/// Engine observer that turns each changed board into a pushed `board` message
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<BoardMessage>,
    seq: AtomicU64,
}

impl ChannelObserver {
    /// Observer plus the receiver to hand to [`run_server`](crate::server::run_server)
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<BoardMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let observer = Arc::new(Self {
            tx,
            seq: AtomicU64::new(0),
        });
        (observer, rx)
    }
}

impl BoardObserver for ChannelObserver {
    fn board_changed(&self, snapshot: &BoardSnapshot) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        // Server gone means nobody is listening; nothing to do.
        let _ = self.tx.send(create_board(seq, snapshot));
    }
}
