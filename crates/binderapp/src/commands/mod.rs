//! # Command Layer
//!
//! This module contains the **core business logic** of binder. Each command lives in
//! its own submodule and implements plain Rust functions over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Validate page and slot numbers against the binder's geometry
//! - Compute new slot indices with [`crate::slots`]
//! - Persist the result through the store
//! - Return a structured [`CmdResult`] with affected cards and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Plan, Commit, Report
//!
//! Every command that changes where cards sit is split in three steps:
//!
//! 1. `plan(...)` reads the store and returns a [`RemapPlan`]: placements before and
//!    after, cards leaving the binder, and any page count change. No writes.
//! 2. [`helpers::commit`] persists the plan as one index batch.
//! 3. [`helpers::report`] turns the committed plan into a [`CmdResult`].
//!
//! `run(...)` chains the three. The API facade calls them separately so it can update
//! its optimistic cache between planning and committing.
//!
//! ## Command Modules
//!
//! - [`create`]: Create a binder
//! - [`list`]: List binders
//! - [`view`]: Show a binder's cards, optionally one page
//! - [`rename`]: Rename a binder
//! - [`delete`]: Delete a binder and its cards
//! - [`place`]: Put a new card into a slot
//! - [`move_card`]: Move a card to another slot, swapping if taken
//! - [`remove`]: Take a card out, optionally closing the gap
//! - [`slot_shift`]: Open an empty slot or close an empty one
//! - [`pages`]: Move, insert, delete and append pages
//! - [`doctor`]: Verify and fix slot consistency
//! - [`helpers`]: Binder resolution, plan commit and reporting

use crate::address::SlotAddress;
use crate::model::{Binder, Card, IndexBatch, Placement};
use crate::slots::{diff, write_order, ShiftDirection};
use serde::Serialize;
use uuid::Uuid;

pub mod create;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod list;
pub mod move_card;
pub mod pages;
pub mod place;
pub mod remove;
pub mod rename;
pub mod slot_shift;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A card together with its user-facing address.
#[derive(Debug, Clone)]
pub struct SlottedCard {
    pub card: Card,
    pub address: SlotAddress,
    /// Index before the command ran, for cards that moved.
    pub previous_index: Option<usize>,
    pub previous_address: Option<SlotAddress>,
}

/// A binder as it appears in the listing.
#[derive(Debug, Clone)]
pub struct ListedBinder {
    /// 1-based position in the canonical listing.
    pub position: usize,
    pub binder: Binder,
    pub card_count: usize,
}

/// A binder with the cards to display.
#[derive(Debug, Clone)]
pub struct BinderView {
    pub binder: Binder,
    pub cards: Vec<Card>,
    /// Set when only one page was requested.
    pub page: Option<usize>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cards: Vec<SlottedCard>,
    pub listed_binders: Vec<ListedBinder>,
    pub binder: Option<BinderView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_cards(mut self, cards: Vec<SlottedCard>) -> Self {
        self.affected_cards = cards;
        self
    }

    pub fn with_listed_binders(mut self, binders: Vec<ListedBinder>) -> Self {
        self.listed_binders = binders;
        self
    }

    pub fn with_binder(mut self, view: BinderView) -> Self {
        self.binder = Some(view);
        self
    }
}

/// Everything a placement-changing command intends to write.
#[derive(Debug, Clone)]
pub struct RemapPlan {
    /// The binder as it will be after the commit.
    pub binder: Binder,
    /// Page count before the commit.
    pub previous_pages: usize,
    /// Cards as they were when planning.
    pub cards: Vec<Card>,
    pub before: Vec<Placement>,
    /// Placements of the cards that stay in the binder.
    pub after: Vec<Placement>,
    /// Cards the user asked to take out.
    pub removed: Vec<Uuid>,
    /// Cards pushed out by a shift.
    pub dropped: Vec<Uuid>,
    /// Write order for shifts. `None` for permutations.
    pub direction: Option<ShiftDirection>,
    /// Success message shown once committed.
    pub summary: String,
    /// Extra info lines shown after the summary.
    pub notes: Vec<String>,
}

impl RemapPlan {
    pub fn new(binder: Binder, cards: Vec<Card>, summary: impl Into<String>) -> Self {
        let before = crate::model::placements(&cards);
        Self {
            previous_pages: binder.total_pages,
            after: before.clone(),
            before,
            binder,
            cards,
            removed: Vec::new(),
            dropped: Vec::new(),
            direction: None,
            summary: summary.into(),
            notes: Vec::new(),
        }
    }

    /// The rows to write: removals plus changed indices, in collision-safe order,
    /// and the page count when it changes.
    pub fn batch(&self) -> IndexBatch {
        let mut updates = diff(&self.before, &self.after);
        if let Some(direction) = self.direction {
            write_order(&mut updates, direction);
        }
        let mut removals = self.removed.clone();
        removals.extend(self.dropped.iter().copied());
        let total_pages =
            (self.binder.total_pages != self.previous_pages).then_some(self.binder.total_pages);
        IndexBatch {
            removals,
            updates,
            total_pages,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.batch().is_empty()
    }

    pub(crate) fn card(&self, id: &Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == *id)
    }
}
