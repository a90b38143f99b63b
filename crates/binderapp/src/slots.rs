//! # Slot Reindexing
//!
//! Card positions are slot indices in the binder's flattened page sequence (see
//! [`crate::model`]). Whenever pages are reordered, inserted or deleted, or a slot is
//! opened or closed, the *indices* of existing cards are recomputed; the cards
//! themselves never change.
//!
//! Everything here is pure: the functions take placements and geometry numbers and
//! return new placements. Persisting the result is the caller's job.
//!
//! ## Page Moves
//!
//! [`reindex_for_page_move`] moves a whole page from `source` to `target` and shifts
//! the pages in between by one page width. Each card is remapped from its own index
//! alone, never from where other cards end up:
//!
//! ```text
//! source_start = (source - 1) * cpp        source_end = source_start + cpp - 1
//! target_start = (target - 1) * cpp        forward    = target_start > source_start
//! landing      = forward ? target_start - cpp : target_start
//!
//! source_start <= i <= source_end           -> landing + (i - source_start)
//! forward  && source_end < i < target_start -> i - cpp
//! !forward && target_start <= i < source_start -> i + cpp
//! otherwise                                  -> i
//! ```
//!
//! Moving forward therefore drops the page just *before* the target page: moving page
//! 1 to page 3 leaves it at position 2. [`page_move_inverse`] gives the move that
//! undoes any given move.
//!
//! ## Slot Shifts
//!
//! [`shift_cards`] opens an empty slot (every card at or after `from` moves up by one)
//! or closes a gap (every card strictly after `from` moves down by one). Opening a
//! slot in a full binder pushes the last card off the end: that card is **dropped**
//! and reported in [`ShiftOutcome::dropped`].
//!
//! ## Write Ordering
//!
//! When a shift is persisted as individual row updates, applying them in the wrong
//! order creates a temporary duplicate index. [`write_order`] sorts updates so that
//! inserts write the highest index first and deletes the lowest index first.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use uuid::Uuid;

use crate::error::{BinderError, Result};
use crate::model::{IndexUpdate, Placement};

/// Result of a shift: surviving placements (input order) and ids pushed off the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftOutcome {
    pub placements: Vec<Placement>,
    pub dropped: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Indices grow: write highest first.
    Insert,
    /// Indices shrink: write lowest first.
    Delete,
}

fn require_positive(value: usize, what: &str) -> Result<()> {
    if value == 0 {
        return Err(BinderError::Precondition(format!("{} must be positive", what)));
    }
    Ok(())
}

/// Move page `source_page` to `target_page` (both 1-based), shifting the pages in
/// between by one page width.
///
/// The output has the same ids in the same order as `cards`; only indices change.
/// Page numbers are not checked against the binder's page count, callers do that.
pub fn reindex_for_page_move(
    cards: &[Placement],
    cards_per_page: usize,
    source_page: usize,
    target_page: usize,
) -> Result<Vec<Placement>> {
    require_positive(cards_per_page, "cards per page")?;
    require_positive(source_page, "source page")?;
    require_positive(target_page, "target page")?;

    if source_page == target_page {
        return Ok(cards.to_vec());
    }

    let source_start = (source_page - 1) * cards_per_page;
    let source_end = source_start + cards_per_page - 1;
    let target_start = (target_page - 1) * cards_per_page;
    let moving_forward = target_start > source_start;
    let landing_start = if moving_forward {
        target_start - cards_per_page
    } else {
        target_start
    };

    let remapped: Vec<Placement> = cards
        .iter()
        .map(|card| {
            let index = card.index;
            let new_index = if (source_start..=source_end).contains(&index) {
                landing_start + (index - source_start)
            } else if moving_forward && index > source_end && index < target_start {
                index - cards_per_page
            } else if !moving_forward && index >= target_start && index < source_start {
                index + cards_per_page
            } else {
                index
            };
            Placement::new(card.id, new_index)
        })
        .collect();

    debug!(
        source_page,
        target_page,
        cards_per_page,
        moved = remapped
            .iter()
            .zip(cards)
            .filter(|(new, old)| new.index != old.index)
            .count(),
        "reindexed page move"
    );

    Ok(remapped)
}

/// The move that undoes `source -> target` under [`reindex_for_page_move`].
///
/// A forward move lands the page at `target - 1`, a backward move lands it at
/// `target`.
pub fn page_move_inverse(source_page: usize, target_page: usize) -> (usize, usize) {
    if target_page > source_page {
        (target_page - 1, source_page)
    } else if target_page < source_page {
        (target_page, source_page + 1)
    } else {
        (source_page, target_page)
    }
}

/// Page position a moved page ends up at.
pub fn page_move_landing(source_page: usize, target_page: usize) -> usize {
    if target_page > source_page {
        target_page - 1
    } else {
        target_page
    }
}

/// Open (`insert_empty`) or close a slot at `from_index`.
///
/// Opening: cards at `>= from_index` move up by one, cards pushed to
/// `>= total_slots` are dropped. Closing: cards at `> from_index` move down by one.
pub fn shift_cards(
    cards: &[Placement],
    from_index: usize,
    insert_empty: bool,
    total_slots: usize,
) -> Result<ShiftOutcome> {
    require_positive(total_slots, "total slots")?;

    let mut outcome = ShiftOutcome::default();
    for card in cards {
        if insert_empty {
            if card.index >= from_index {
                let new_index = card.index + 1;
                if new_index >= total_slots {
                    outcome.dropped.push(card.id);
                    continue;
                }
                outcome.placements.push(Placement::new(card.id, new_index));
            } else {
                outcome.placements.push(*card);
            }
        } else if card.index > from_index {
            outcome
                .placements
                .push(Placement::new(card.id, card.index - 1));
        } else {
            outcome.placements.push(*card);
        }
    }

    debug!(
        from_index,
        insert_empty,
        total_slots,
        dropped = outcome.dropped.len(),
        "shifted slots"
    );

    Ok(outcome)
}

/// Insert a blank page at `at_page`, or delete page `at_page` and close the gap.
///
/// Inserting moves every card from the start of `at_page` onward up by one page.
/// Deleting drops the cards on `at_page` and moves later cards down by one page.
pub fn shift_pages(
    cards: &[Placement],
    cards_per_page: usize,
    at_page: usize,
    insert: bool,
) -> Result<ShiftOutcome> {
    require_positive(cards_per_page, "cards per page")?;
    require_positive(at_page, "page")?;

    let page_start = (at_page - 1) * cards_per_page;
    let page_end = page_start + cards_per_page;

    let mut outcome = ShiftOutcome::default();
    for card in cards {
        if insert {
            if card.index >= page_start {
                outcome
                    .placements
                    .push(Placement::new(card.id, card.index + cards_per_page));
            } else {
                outcome.placements.push(*card);
            }
        } else if card.index >= page_end {
            outcome
                .placements
                .push(Placement::new(card.id, card.index - cards_per_page));
        } else if card.index >= page_start {
            outcome.dropped.push(card.id);
        } else {
            outcome.placements.push(*card);
        }
    }
    Ok(outcome)
}

/// Row updates needed to go from `before` to `after`. Ids absent from `after` are
/// not included; removing them is a separate step.
pub fn diff(before: &[Placement], after: &[Placement]) -> Vec<IndexUpdate> {
    let old: HashMap<Uuid, usize> = before.iter().map(|p| (p.id, p.index)).collect();
    after
        .iter()
        .filter(|p| old.get(&p.id) != Some(&p.index))
        .map(|p| IndexUpdate {
            id: p.id,
            new_index: p.index,
        })
        .collect()
}

/// Order row updates so one-at-a-time application never collides.
///
/// Shifts are monotone, so sorting by new index matches sorting by old index.
pub fn write_order(updates: &mut [IndexUpdate], direction: ShiftDirection) {
    match direction {
        ShiftDirection::Insert => updates.sort_by(|a, b| b.new_index.cmp(&a.new_index)),
        ShiftDirection::Delete => updates.sort_by(|a, b| a.new_index.cmp(&b.new_index)),
    }
}

/// First index in `0..total_slots` that no placement occupies.
pub fn first_free_slot(cards: &[Placement], total_slots: usize) -> Option<usize> {
    let taken: BTreeSet<usize> = cards.iter().map(|c| c.index).collect();
    let mut candidate = 0;
    for index in taken {
        if index != candidate {
            break;
        }
        candidate += 1;
    }
    (candidate < total_slots).then_some(candidate)
}
