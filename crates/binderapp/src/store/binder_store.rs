use super::backend::StorageBackend;
use super::{DataStore, DoctorReport};
use crate::error::{BinderError, Result};
use crate::model::{placements, Binder, Card, IndexBatch};
use crate::slots::first_free_slot;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct BinderStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> BinderStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn batch_error(binder: &Uuid, failed: usize, reasons: &[String]) -> BinderError {
        BinderError::BatchWrite {
            binder: *binder,
            failed,
            reason: reasons.join("; "),
        }
    }

    /// Persist a validated batch. A binder that grows is saved before its cards and
    /// one that shrinks after them, so every state on disk between the two writes is
    /// consistent. If the second write fails the first is undone.
    fn write_batch(
        &self,
        before: &Binder,
        after: &Binder,
        old_cards: &[Card],
        new_cards: &[Card],
    ) -> std::result::Result<(), String> {
        if before.total_pages == after.total_pages {
            return self
                .backend
                .save_cards(&after.id, new_cards)
                .map_err(|e| e.to_string());
        }

        if after.total_pages > before.total_pages {
            self.put_binder(after).map_err(|e| e.to_string())?;
            if let Err(e) = self.backend.save_cards(&after.id, new_cards) {
                return Err(self.undo(e, "page count", || self.put_binder(before)));
            }
        } else {
            self.backend
                .save_cards(&after.id, new_cards)
                .map_err(|e| e.to_string())?;
            if let Err(e) = self.put_binder(after) {
                return Err(self.undo(e, "cards", || {
                    self.backend.save_cards(&before.id, old_cards)
                }));
            }
        }
        Ok(())
    }

    fn undo<F>(&self, cause: BinderError, what: &str, restore: F) -> String
    where
        F: FnOnce() -> Result<()>,
    {
        match restore() {
            Ok(()) => cause.to_string(),
            Err(restore_err) => {
                warn!(error = %restore_err, "could not restore {}", what);
                format!("{}; restoring {} also failed: {}", cause, what, restore_err)
            }
        }
    }

    fn put_binder(&self, binder: &Binder) -> Result<()> {
        let mut binders = self.backend.load_binders()?;
        binders.insert(binder.id, binder.clone());
        self.backend.save_binders(&binders)
    }

    /// Put misplaced cards (duplicate or out-of-range index) into free slots.
    fn repair_binder(&self, binder: &Binder, report: &mut DoctorReport) -> Result<()> {
        let mut cards = self.backend.load_cards(&binder.id)?;
        let total_slots = binder.total_slots();

        // Earliest-added card keeps a contested slot.
        cards.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.id.cmp(&b.id)));

        let mut seen = HashSet::new();
        let mut misplaced = Vec::new();
        for (pos, card) in cards.iter().enumerate() {
            if card.index >= total_slots || !seen.insert(card.index) {
                misplaced.push(pos);
            }
        }
        if misplaced.is_empty() {
            return Ok(());
        }

        let mut changed = false;
        for pos in misplaced {
            let occupied: Vec<_> = placements(&cards)
                .into_iter()
                .enumerate()
                .filter(|(other, p)| *other != pos && p.index < total_slots)
                .map(|(_, p)| p)
                .collect();
            // Duplicates still sharing the slot count as occupying it.
            match first_free_slot(&occupied, total_slots) {
                Some(free) => {
                    debug!(card = %cards[pos].id, from = cards[pos].index, to = free, "relocating card");
                    cards[pos].index = free;
                    report.relocated_cards += 1;
                    changed = true;
                }
                None => {
                    warn!(card = %cards[pos].id, binder = %binder.id, "no free slot for misplaced card");
                    report.unplaced_cards += 1;
                }
            }
        }

        if changed {
            cards.sort_by_key(|c| c.index);
            self.backend.save_cards(&binder.id, &cards)?;
        }
        Ok(())
    }
}

impl<B: StorageBackend> DataStore for BinderStore<B> {
    fn save_binder(&mut self, binder: &Binder) -> Result<()> {
        binder.geometry().validate()?;
        self.put_binder(binder)
    }

    fn get_binder(&self, id: &Uuid) -> Result<Binder> {
        let binders = self.backend.load_binders()?;
        binders
            .get(id)
            .cloned()
            .ok_or(BinderError::BinderNotFound(*id))
    }

    fn list_binders(&self) -> Result<Vec<Binder>> {
        Ok(self.backend.load_binders()?.into_values().collect())
    }

    fn delete_binder(&mut self, id: &Uuid) -> Result<()> {
        // Index first: a leftover card file is an orphan that doctor removes.
        let mut binders = self.backend.load_binders()?;
        if binders.remove(id).is_none() {
            return Err(BinderError::BinderNotFound(*id));
        }
        self.backend.save_binders(&binders)?;
        self.backend.delete_cards(id)
    }

    fn list_cards(&self, binder_id: &Uuid) -> Result<Vec<Card>> {
        self.get_binder(binder_id)?;
        let mut cards = self.backend.load_cards(binder_id)?;
        cards.sort_by_key(|c| c.index);
        Ok(cards)
    }

    fn save_card(&mut self, card: &Card) -> Result<()> {
        let binder = self.get_binder(&card.binder_id)?;
        binder.geometry().check_index(card.index)?;

        let mut cards = self.backend.load_cards(&card.binder_id)?;
        if cards
            .iter()
            .any(|c| c.index == card.index && c.id != card.id)
        {
            return Err(BinderError::SlotOccupied(card.index));
        }

        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        self.backend.save_cards(&card.binder_id, &cards)
    }

    fn apply_index_batch(&mut self, binder_id: &Uuid, batch: &IndexBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let binder = self.get_binder(binder_id)?;
        let original_cards = self.backend.load_cards(binder_id)?;
        let mut cards = original_cards.clone();

        let mut reasons = Vec::new();
        let mut failed = 0;

        let mut resized = binder.clone();
        if let Some(pages) = batch.total_pages {
            if let Err(e) = resized.set_total_pages(pages) {
                failed += 1;
                reasons.push(e.to_string());
            }
        }
        let total_slots = resized.total_slots();

        let removals: HashSet<Uuid> = batch.removals.iter().copied().collect();
        for id in &removals {
            if !cards.iter().any(|c| c.id == *id) {
                failed += 1;
                reasons.push(format!("card {} not in binder", id));
            }
        }
        cards.retain(|c| !removals.contains(&c.id));

        let positions: HashMap<Uuid, usize> = cards
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.id, pos))
            .collect();

        for update in &batch.updates {
            match positions.get(&update.id) {
                None => {
                    failed += 1;
                    reasons.push(format!("card {} not in binder", update.id));
                }
                Some(_) if update.new_index >= total_slots => {
                    failed += 1;
                    reasons.push(format!(
                        "card {} index {} out of range (0..{})",
                        update.id, update.new_index, total_slots
                    ));
                }
                Some(&pos) => cards[pos].index = update.new_index,
            }
        }

        let mut seen = HashSet::new();
        for card in &cards {
            if batch.total_pages.is_some() && card.index >= total_slots {
                failed += 1;
                reasons.push(format!(
                    "card {} left at index {} outside the binder",
                    card.id, card.index
                ));
            }
            if !seen.insert(card.index) {
                failed += 1;
                reasons.push(format!("index {} would hold two cards", card.index));
            }
        }

        if failed > 0 {
            warn!(binder = %binder_id, failed, "rejected index batch");
            return Err(Self::batch_error(binder_id, failed, &reasons));
        }

        let total = batch.updates.len() + batch.removals.len() + batch.total_pages.iter().count();
        self.write_batch(&binder, &resized, &original_cards, &cards)
            .map_err(|reason| Self::batch_error(binder_id, total, &[reason]))?;

        info!(
            binder = %binder_id,
            updates = batch.updates.len(),
            removals = batch.removals.len(),
            total_pages = resized.total_pages,
            "persisted index batch"
        );
        Ok(())
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut report = DoctorReport::default();
        let binders = self.backend.load_binders()?;

        for binder in binders.values() {
            self.repair_binder(binder, &mut report)?;
        }

        for orphan in self.backend.list_card_files()? {
            if !binders.contains_key(&orphan) {
                self.backend.delete_cards(&orphan)?;
                report.removed_orphan_files += 1;
            }
        }

        Ok(report)
    }
}
