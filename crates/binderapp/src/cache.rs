//! # Optimistic Placement Cache
//!
//! A UI wants to show the result of a drag or a page move immediately, before the
//! store has confirmed the write. [`PlacementCache`] keeps a local copy of each
//! binder's placements and updates it in three explicit steps:
//!
//! 1. [`PlacementCache::snapshot`] the current copy,
//! 2. [`PlacementCache::apply`] the remapped placements,
//! 3. [`PlacementCache::rollback`] to the snapshot if the authoritative write fails.
//!
//! [`PlacementCache::optimistic`] wraps the three steps around a persistence closure.
//! The cache is never the source of truth: after a rollback it holds exactly what it
//! held before, and [`PlacementCache::load`] refreshes it from a store read.

use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::model::Placement;

/// Saved cache state for one binder. `None` means the binder was not cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    binder_id: Uuid,
    placements: Option<Vec<Placement>>,
}

#[derive(Debug, Default)]
pub struct PlacementCache {
    entries: HashMap<Uuid, Vec<Placement>>,
}

impl PlacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, binder_id: &Uuid) -> Option<&[Placement]> {
        self.entries.get(binder_id).map(Vec::as_slice)
    }

    /// Replace the cached copy with authoritative data.
    pub fn load(&mut self, binder_id: Uuid, placements: Vec<Placement>) {
        self.entries.insert(binder_id, placements);
    }

    pub fn invalidate(&mut self, binder_id: &Uuid) {
        self.entries.remove(binder_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self, binder_id: &Uuid) -> Snapshot {
        Snapshot {
            binder_id: *binder_id,
            placements: self.entries.get(binder_id).cloned(),
        }
    }

    pub fn apply(&mut self, binder_id: Uuid, placements: Vec<Placement>) {
        self.entries.insert(binder_id, placements);
    }

    pub fn rollback(&mut self, snapshot: Snapshot) {
        match snapshot.placements {
            Some(placements) => {
                self.entries.insert(snapshot.binder_id, placements);
            }
            None => {
                self.entries.remove(&snapshot.binder_id);
            }
        }
    }

    /// Apply `placements` locally, then run `persist`. On failure the cache is
    /// restored and the error returned.
    pub fn optimistic<T, F>(
        &mut self,
        binder_id: Uuid,
        placements: Vec<Placement>,
        persist: F,
    ) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let snapshot = self.snapshot(&binder_id);
        self.apply(binder_id, placements);
        match persist() {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(binder = %binder_id, error = %err, "write failed, rolling back cached placements");
                self.rollback(snapshot);
                Err(err)
            }
        }
    }
}
