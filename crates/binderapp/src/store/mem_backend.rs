use super::backend::StorageBackend;
use crate::error::{BinderError, Result};
use crate::model::{Binder, Card};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Single-threaded, so plain `RefCell`s back the `&self` methods of
/// `StorageBackend`.
#[derive(Default)]
pub struct MemBackend {
    binders: RefCell<HashMap<Uuid, Binder>>,
    cards: RefCell<HashMap<Uuid, Vec<Card>>>,
    simulate_write_error: RefCell<bool>,
    /// Writes left before a single simulated failure.
    writes_until_failure: RefCell<Option<usize>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Let `n - 1` writes through, fail the `n`th, then write normally again.
    pub fn fail_nth_write(&self, n: usize) {
        *self.writes_until_failure.borrow_mut() = Some(n);
    }

    /// Test helper to write cards directly, bypassing slot checks.
    pub fn put_raw_cards(&self, binder_id: &Uuid, cards: Vec<Card>) {
        self.cards.borrow_mut().insert(*binder_id, cards);
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(BinderError::Store("Simulated write error".to_string()));
        }
        let mut countdown = self.writes_until_failure.borrow_mut();
        match *countdown {
            Some(n) if n <= 1 => {
                *countdown = None;
                Err(BinderError::Store("Simulated write error".to_string()))
            }
            Some(n) => {
                *countdown = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl StorageBackend for MemBackend {
    fn load_binders(&self) -> Result<HashMap<Uuid, Binder>> {
        Ok(self.binders.borrow().clone())
    }

    fn save_binders(&self, binders: &HashMap<Uuid, Binder>) -> Result<()> {
        self.check_writable()?;
        *self.binders.borrow_mut() = binders.clone();
        Ok(())
    }

    fn load_cards(&self, binder_id: &Uuid) -> Result<Vec<Card>> {
        Ok(self
            .cards
            .borrow()
            .get(binder_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_cards(&self, binder_id: &Uuid, cards: &[Card]) -> Result<()> {
        self.check_writable()?;
        self.cards.borrow_mut().insert(*binder_id, cards.to_vec());
        Ok(())
    }

    fn delete_cards(&self, binder_id: &Uuid) -> Result<()> {
        self.check_writable()?;
        self.cards.borrow_mut().remove(binder_id);
        Ok(())
    }

    fn list_card_files(&self) -> Result<Vec<Uuid>> {
        Ok(self.cards.borrow().keys().copied().collect())
    }
}
