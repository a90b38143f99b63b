use crate::error::Result;
use crate::model::{Binder, Card};
use std::collections::HashMap;
use uuid::Uuid;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while BinderStore handles the "what" (slot rules, batches, doctor).
pub trait StorageBackend {
    // --- Binder Index ---

    /// Load the binder index (binders.json)
    fn load_binders(&self) -> Result<HashMap<Uuid, Binder>>;

    /// Save the binder index.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_binders(&self, binders: &HashMap<Uuid, Binder>) -> Result<()>;

    // --- Card Files ---

    /// Load all cards of a binder. A binder without a card file has no cards.
    fn load_cards(&self, binder_id: &Uuid) -> Result<Vec<Card>>;

    /// Replace all cards of a binder in one write.
    fn save_cards(&self, binder_id: &Uuid, cards: &[Card]) -> Result<()>;

    /// Delete a binder's card file. Missing files are not an error.
    fn delete_cards(&self, binder_id: &Uuid) -> Result<()>;

    /// List binder ids that have a card file (for orphan detection).
    fn list_card_files(&self) -> Result<Vec<Uuid>>;
}
