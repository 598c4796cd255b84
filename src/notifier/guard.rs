//! Per-item reentrancy guard.
//!
//! A notification cycle can cause the host to write the item's status again,
//! which fires another transition for the same item while the first cycle is
//! still running. The item id is held in a shared set for the duration of a
//! cycle; a second entry for the same id is refused. The id is released when
//! the guard drops, including on early return or panic.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone)]
pub struct InProgress {
    ids: Arc<Mutex<HashSet<u64>>>,
}

impl InProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`, or `None` if a cycle for it is already running.
    pub fn try_enter(&self, id: u64) -> Option<InProgressGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.insert(id).then(|| InProgressGuard {
            ids: Arc::clone(&self.ids),
            id,
        })
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&id)
    }
}

/// Releases its id on drop.
#[derive(Debug)]
pub struct InProgressGuard {
    ids: Arc<Mutex<HashSet<u64>>>,
    id: u64,
}

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}
