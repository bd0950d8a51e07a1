//! Per-room async locks.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// One async mutex per room.
///
/// Serialises the overlap-check-then-insert sequence for a room within this
/// process. The database exclusion constraint covers multi-process
/// deployments; this lock keeps the common case from ever reaching it.
#[derive(Debug, Clone, Default)]
pub struct RoomLocks {
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a room, waiting if another booking for the same
    /// room is in flight.
    pub async fn acquire(&self, room_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
