//! Per-game async mutexes serializing read-modify-write inside one process.
//!
//! An entry exists only while some request holds or waits on it, so the map
//! is bounded by in-flight mutations rather than by game ids ever touched.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `game_id`. No cross-game locking.
    pub async fn acquire(&self, game_id: i64) -> SessionGuard<'_> {
        let mutex = self.locks.entry(game_id).or_default().clone();
        let guard = mutex.lock_owned().await;
        SessionGuard {
            locks: self,
            game_id,
            guard: Some(guard),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Remove the entry unless a waiter still holds a clone of its mutex.
    fn prune(&self, game_id: i64) {
        self.locks
            .remove_if(&game_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Exclusive access to one game; the map entry is pruned on drop.
pub struct SessionGuard<'a> {
    locks: &'a SessionLocks,
    game_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps an Arc clone alive; let go of it first.
        drop(self.guard.take());
        self.locks.prune(self.game_id);
    }
}
