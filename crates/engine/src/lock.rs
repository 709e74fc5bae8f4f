//! Board lock - single reader/writer lock guarding the shared board
//!
//! Three access levels:
//!
//! - [`BoardLock::read`]: shared, for snapshots and validation
//! - [`BoardLock::upgradable_read`]: shared with readers but exclusive among
//!   upgraders and writers; lets the engine decide whether a pass has work
//!   without blocking readers, then [`BoardUpgradableGuard::upgrade`] in place
//! - [`BoardLock::write`]: exclusive
//!
//! Only [`BoardWriteGuard`] hands out `&mut Board`, so every mutation of tile
//! colors, destruction stamps or positions is statically tied to holding the
//! write lock.

use std::ops::{Deref, DerefMut};

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};

use crate::core::{Board, BoardSnapshot};

#[derive(Debug)]
pub struct BoardLock {
    inner: RwLock<Board>,
}

impl BoardLock {
    pub fn new(board: Board) -> Self {
        Self {
            inner: RwLock::new(board),
        }
    }

    pub fn read(&self) -> BoardReadGuard<'_> {
        BoardReadGuard(self.inner.read())
    }

    pub fn upgradable_read(&self) -> BoardUpgradableGuard<'_> {
        BoardUpgradableGuard(self.inner.upgradable_read())
    }

    pub fn write(&self) -> BoardWriteGuard<'_> {
        BoardWriteGuard(self.inner.write())
    }

    /// Copy of the board taken under a read lock
    pub fn snapshot(&self) -> BoardSnapshot {
        self.read().snapshot()
    }
}

pub struct BoardReadGuard<'a>(RwLockReadGuard<'a, Board>);

impl Deref for BoardReadGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &self.0
    }
}

pub struct BoardUpgradableGuard<'a>(RwLockUpgradableReadGuard<'a, Board>);

impl<'a> BoardUpgradableGuard<'a> {
    /// Escalate to exclusive access, waiting for current readers to leave
    pub fn upgrade(self) -> BoardWriteGuard<'a> {
        BoardWriteGuard(RwLockUpgradableReadGuard::upgrade(self.0))
    }
}

impl Deref for BoardUpgradableGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &self.0
    }
}

/// Proof of exclusive access; the only way to reach `&mut Board`
pub struct BoardWriteGuard<'a>(RwLockWriteGuard<'a, Board>);

impl BoardWriteGuard<'_> {
    /// Swap in a whole new board (new game)
    pub fn replace(&mut self, board: Board) -> Board {
        std::mem::replace(&mut *self.0, board)
    }
}

impl Deref for BoardWriteGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &self.0
    }
}

impl DerefMut for BoardWriteGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut self.0
    }
}
