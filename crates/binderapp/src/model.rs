//! # Domain Model: Binders, Cards and Slots
//!
//! A [`Binder`] is a fixed grid: every page holds `rows * columns` slots and the
//! binder has `total_pages` pages. Cards live at a zero-based **slot index** in the
//! binder's flattened page sequence:
//!
//! ```text
//! index = (page - 1) * cards_per_page + offset_within_page
//! ```
//!
//! So a 3x3 binder with 2 pages looks like this:
//!
//! ```text
//!   page 1          page 2
//!  0  1  2         9 10 11
//!  3  4  5        12 13 14
//!  6  7  8        15 16 17
//! ```
//!
//! Empty slots are simply absent: a binder stores only the occupied slots, each as
//! a [`Card`]. At most one card occupies a given index.
//!
//! Remapping works on the reduced [`Placement`] view (`id`, `index`), which is all the
//! slot arithmetic in [`crate::slots`] needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BinderError, Result};

/// Shape of a binder: page grid and page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub rows: usize,
    pub columns: usize,
    pub total_pages: usize,
}

impl Geometry {
    /// Build a geometry, rejecting any zero dimension or a slot count that does not
    /// fit in `usize`.
    pub fn new(rows: usize, columns: usize, total_pages: usize) -> Result<Self> {
        let geometry = Self {
            rows,
            columns,
            total_pages,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        let slots = self
            .rows
            .checked_mul(self.columns)
            .and_then(|per_page| per_page.checked_mul(self.total_pages));
        if self.rows == 0 || self.columns == 0 || self.total_pages == 0 || slots.is_none() {
            return Err(BinderError::InvalidGeometry {
                rows: self.rows,
                columns: self.columns,
                pages: self.total_pages,
            });
        }
        Ok(())
    }

    pub fn cards_per_page(&self) -> usize {
        self.rows * self.columns
    }

    pub fn total_slots(&self) -> usize {
        self.cards_per_page() * self.total_pages
    }

    /// Index range `[start, end)` covered by a 1-based page.
    pub fn page_range(&self, page: usize) -> std::ops::Range<usize> {
        let start = (page.saturating_sub(1)) * self.cards_per_page();
        start..start + self.cards_per_page()
    }

    pub fn check_page(&self, page: usize) -> Result<()> {
        if page == 0 || page > self.total_pages {
            return Err(BinderError::PageOutOfRange {
                page,
                total_pages: self.total_pages,
            });
        }
        Ok(())
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.total_slots() {
            return Err(BinderError::SlotOutOfRange {
                index,
                total_slots: self.total_slots(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binder {
    pub id: Uuid,
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub total_pages: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Binder {
    pub fn new(name: String, geometry: Geometry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            rows: geometry.rows,
            columns: geometry.columns,
            total_pages: geometry.total_pages,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            rows: self.rows,
            columns: self.columns,
            total_pages: self.total_pages,
        }
    }

    pub fn cards_per_page(&self) -> usize {
        self.geometry().cards_per_page()
    }

    pub fn total_slots(&self) -> usize {
        self.geometry().total_slots()
    }

    /// Change the page count, keeping the `total_pages >= 1` invariant.
    pub fn set_total_pages(&mut self, total_pages: usize) -> Result<()> {
        Geometry {
            total_pages,
            ..self.geometry()
        }
        .validate()?;
        self.total_pages = total_pages;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A card sitting in one slot of one binder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub binder_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub set_code: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    pub index: usize,
    pub added_at: DateTime<Utc>,
}

impl Card {
    pub fn new(binder_id: Uuid, name: String, index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            binder_id,
            name,
            set_code: None,
            number: None,
            index,
            added_at: Utc::now(),
        }
    }

    pub fn with_set(mut self, set_code: Option<String>, number: Option<String>) -> Self {
        self.set_code = set_code;
        self.number = number;
        self
    }

    pub fn placement(&self) -> Placement {
        Placement {
            id: self.id,
            index: self.index,
        }
    }
}

/// The `(id, index)` view of a card used by the remap functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub id: Uuid,
    pub index: usize,
}

impl Placement {
    pub fn new(id: Uuid, index: usize) -> Self {
        Self { id, index }
    }
}

/// A single row write: card `id` now lives at `new_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexUpdate {
    pub id: Uuid,
    pub new_index: usize,
}

/// Everything one remap writes for a binder: cards leaving it, cards changing slot
/// and, for page inserts and deletes, the new page count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexBatch {
    pub removals: Vec<Uuid>,
    pub updates: Vec<IndexUpdate>,
    pub total_pages: Option<usize>,
}

impl IndexBatch {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.updates.is_empty() && self.total_pages.is_none()
    }
}

pub fn placements(cards: &[Card]) -> Vec<Placement> {
    cards.iter().map(Card::placement).collect()
}
