//! # Storage Layer
//!
//! This module defines the storage abstraction for binders. The [`DataStore`] trait
//! is what commands talk to; the [`backend::StorageBackend`] trait is the raw I/O
//! underneath it.
//!
//! ## Two Layers
//!
//! - [`backend::StorageBackend`]: the "how". Load and save the binder index and each
//!   binder's card file. Knows nothing about slots.
//! - [`binder_store::BinderStore`]: the "what". Implements [`DataStore`] over any
//!   backend: slot range checks, collision checks, batch index writes and `doctor`.
//!
//! ## Batch Index Writes
//!
//! Reindexing produces many `{id, new_index}` pairs at once, plus the cards leaving
//! the binder and, for page inserts and deletes, a new page count. A partially
//! applied remap leaves a binder inconsistent, so [`DataStore::apply_index_batch`]
//! applies the whole batch in memory and validates the result before writing. The
//! card file is one write; a page count change adds a binder index write, ordered so
//! the pair never leaves cards outside the binder and undone if the second write
//! fails. Any failure rejects the entire batch with one
//! [`crate::error::BinderError::BatchWrite`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store backed by JSON files.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── binder.toml             # Configuration
//! ├── binders.json            # Binder index
//! └── cards-{binder-id}.json  # One card file per binder
//! ```

use crate::error::Result;
use crate::model::{Binder, Card, IndexBatch};
use uuid::Uuid;

pub mod backend;
pub mod binder_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Report from the `doctor` operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    /// Cards moved off a duplicate or out-of-range index.
    pub relocated_cards: usize,
    /// Cards that needed a new slot but the binder was full.
    pub unplaced_cards: usize,
    /// Card files whose binder no longer exists.
    pub removed_orphan_files: usize,
}

/// Abstract interface for binder storage.
pub trait DataStore {
    /// Save a binder (create or update)
    fn save_binder(&mut self, binder: &Binder) -> Result<()>;

    fn get_binder(&self, id: &Uuid) -> Result<Binder>;

    fn list_binders(&self) -> Result<Vec<Binder>>;

    /// Delete a binder and all its cards
    fn delete_binder(&mut self, id: &Uuid) -> Result<()>;

    fn list_cards(&self, binder_id: &Uuid) -> Result<Vec<Card>>;

    /// Insert or replace a single card. Fails if its slot is out of range or taken
    /// by another card.
    fn save_card(&mut self, card: &Card) -> Result<()>;

    /// Apply removals, index updates and a page count change as one atomic write.
    fn apply_index_batch(&mut self, binder_id: &Uuid, batch: &IndexBatch) -> Result<()>;

    /// Verify and fix consistency issues
    fn doctor(&mut self) -> Result<DoctorReport>;
}
