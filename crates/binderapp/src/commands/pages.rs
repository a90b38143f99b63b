//! Page-level edits: move a page, insert a blank page, delete a page, add pages at
//! the end.
//!
//! A page move keeps every card and only relabels slots (see
//! [`reindex_for_page_move`]). Inserting and deleting change the page count, which
//! travels in the same index batch as the card moves.

use crate::address::BinderSelector;
use crate::commands::{CmdResult, RemapPlan};
use crate::error::{BinderError, Result};
use crate::model::Geometry;
use crate::slots::{
    page_move_inverse, page_move_landing, reindex_for_page_move, shift_pages, ShiftDirection,
};
use crate::store::DataStore;

use super::helpers::{execute, resolve_binder};

/// Where a blank page goes relative to an existing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

fn grown_pages(geometry: &Geometry, extra: usize) -> Result<usize> {
    geometry
        .total_pages
        .checked_add(extra)
        .ok_or(BinderError::InvalidGeometry {
            rows: geometry.rows,
            columns: geometry.columns,
            pages: geometry.total_pages,
        })
}

/// Move page `source` so it sits just before the page currently numbered `target`.
pub fn plan_move<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    source: usize,
    target: usize,
) -> Result<RemapPlan> {
    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    geometry.check_page(source)?;
    geometry.check_page(target)?;
    let cards = store.list_cards(&binder.id)?;

    let landing = page_move_landing(source, target);
    let summary = if landing == source {
        format!("Page {} stays where it is", source)
    } else {
        format!("Moved page {} to position {}", source, landing)
    };

    // Moving the last page backwards cannot be undone in one move, since no target
    // lands a page after the current last one.
    let (back_source, back_target) = page_move_inverse(source, target);
    let undo = (landing != source && back_target <= geometry.total_pages).then(|| {
        format!(
            "Undo with: binder move-page \"{}\" {} {}",
            binder.name, back_source, back_target
        )
    });

    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.after = reindex_for_page_move(&plan.before, geometry.cards_per_page(), source, target)?;
    plan.notes.extend(undo);
    Ok(plan)
}

/// Insert a blank page before or after `page`; the binder grows by one page.
pub fn plan_insert<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    page: usize,
    position: InsertPosition,
) -> Result<RemapPlan> {
    let mut binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    geometry.check_page(page)?;
    let cards = store.list_cards(&binder.id)?;

    let at_page = match position {
        InsertPosition::Before => page,
        InsertPosition::After => page + 1,
    };
    binder.set_total_pages(grown_pages(&geometry, 1)?)?;

    let summary = format!(
        "Inserted a blank page {} ({} pages)",
        at_page, binder.total_pages
    );
    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.previous_pages = geometry.total_pages;
    plan.after = shift_pages(&plan.before, geometry.cards_per_page(), at_page, true)?.placements;
    plan.direction = Some(ShiftDirection::Insert);
    Ok(plan)
}

/// Delete `page` together with its cards; later pages move up by one.
pub fn plan_delete<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    page: usize,
) -> Result<RemapPlan> {
    let mut binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    geometry.check_page(page)?;
    if geometry.total_pages == 1 {
        return Err(BinderError::Api(format!(
            "{} has only one page left",
            binder.name
        )));
    }
    let cards = store.list_cards(&binder.id)?;

    let outcome = shift_pages(
        &crate::model::placements(&cards),
        geometry.cards_per_page(),
        page,
        false,
    )?;
    binder.set_total_pages(geometry.total_pages - 1)?;

    let summary = format!(
        "Deleted page {} and {} card(s) on it",
        page,
        outcome.dropped.len()
    );
    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.previous_pages = geometry.total_pages;
    plan.after = outcome.placements;
    plan.removed = outcome.dropped;
    plan.direction = Some(ShiftDirection::Delete);
    Ok(plan)
}

/// Add `count` blank pages after the last page.
pub fn plan_append<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    count: usize,
) -> Result<RemapPlan> {
    if count == 0 {
        return Err(BinderError::Api("Add at least one page".to_string()));
    }
    let mut binder = resolve_binder(store, selector)?;
    let previous_pages = binder.total_pages;
    binder.set_total_pages(grown_pages(&binder.geometry(), count)?)?;
    let cards = store.list_cards(&binder.id)?;

    let summary = format!(
        "Added {} page(s) to {} ({} pages)",
        count, binder.name, binder.total_pages
    );
    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.previous_pages = previous_pages;
    Ok(plan)
}

pub fn run_move<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    source: usize,
    target: usize,
) -> Result<CmdResult> {
    let plan = plan_move(store, selector, source, target)?;
    execute(store, plan)
}

pub fn run_insert<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    page: usize,
    position: InsertPosition,
) -> Result<CmdResult> {
    let plan = plan_insert(store, selector, page, position)?;
    execute(store, plan)
}

pub fn run_delete<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    page: usize,
) -> Result<CmdResult> {
    let plan = plan_delete(store, selector, page)?;
    execute(store, plan)
}

pub fn run_append<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    count: usize,
) -> Result<CmdResult> {
    let plan = plan_append(store, selector, count)?;
    execute(store, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn main() -> BinderSelector {
        BinderSelector::Position(1)
    }

    #[test]
    fn forward_move_lands_before_target() {
        let mut fixture = StoreFixture::new(3, 3, 3).with_cards_at(&[0, 8, 9, 17, 18, 26]);
        let result = run_move(&mut fixture.store, &main(), 1, 3).unwrap();

        assert_eq!(
            fixture.layout(),
            vec![
                ("card-9".to_string(), 0),
                ("card-17".to_string(), 8),
                ("card-0".to_string(), 9),
                ("card-8".to_string(), 17),
                ("card-18".to_string(), 18),
                ("card-26".to_string(), 26),
            ]
        );
        assert_eq!(result.affected_cards.len(), 4);
        assert_eq!(result.messages[0].content, "Moved page 1 to position 2");
        assert_eq!(
            result.messages[1].content,
            "Undo with: binder move-page \"Main\" 2 1"
        );
    }

    #[test]
    fn suggested_undo_restores_layout() {
        let mut fixture = StoreFixture::new(2, 2, 4).with_cards_at(&[0, 4, 9, 11]);
        let before = fixture.layout();

        let result = run_move(&mut fixture.store, &main(), 3, 1).unwrap();
        assert!(result.messages[1].content.ends_with(" 1 4"));
        assert_ne!(fixture.layout(), before);

        let (back_source, back_target) = page_move_inverse(3, 1);
        run_move(&mut fixture.store, &main(), back_source, back_target).unwrap();
        assert_eq!(fixture.layout(), before);
    }

    #[test]
    fn moving_last_page_back_offers_no_undo() {
        let mut fixture = StoreFixture::new(2, 2, 3).with_cards_at(&[8]);
        let result = run_move(&mut fixture.store, &main(), 3, 1).unwrap();
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn backward_move_lands_at_target() {
        let mut fixture = StoreFixture::new(2, 2, 3).with_cards_at(&[0, 4, 8]);
        run_move(&mut fixture.store, &main(), 3, 1).unwrap();
        assert_eq!(
            fixture.layout(),
            vec![
                ("card-8".to_string(), 0),
                ("card-0".to_string(), 4),
                ("card-4".to_string(), 8),
            ]
        );
    }

    #[test]
    fn move_to_next_page_is_a_noop() {
        let mut fixture = StoreFixture::new(2, 2, 3).with_cards_at(&[0, 4]);
        let result = run_move(&mut fixture.store, &main(), 1, 2).unwrap();
        assert_eq!(result.messages[0].content, "Nothing to change");
        assert_eq!(fixture.card_at(0).name, "card-0");
    }

    #[test]
    fn move_rejects_pages_out_of_range() {
        let fixture = StoreFixture::new(2, 2, 3);
        assert!(matches!(
            plan_move(&fixture.store, &main(), 1, 4),
            Err(BinderError::PageOutOfRange { page: 4, .. })
        ));
        assert!(matches!(
            plan_move(&fixture.store, &main(), 0, 2),
            Err(BinderError::PageOutOfRange { page: 0, .. })
        ));
    }

    #[test]
    fn insert_before_page_shifts_it_and_later_pages() {
        let mut fixture = StoreFixture::new(2, 2, 2).with_cards_at(&[1, 5]);
        run_insert(&mut fixture.store, &main(), 2, InsertPosition::Before).unwrap();
        assert_eq!(fixture.reload_binder().total_pages, 3);
        assert_eq!(
            fixture.layout(),
            vec![("card-1".to_string(), 1), ("card-5".to_string(), 9)]
        );
    }

    #[test]
    fn insert_after_last_page_moves_nothing() {
        let mut fixture = StoreFixture::new(2, 2, 2).with_cards_at(&[1, 5]);
        let result = run_insert(&mut fixture.store, &main(), 2, InsertPosition::After).unwrap();
        assert_eq!(fixture.reload_binder().total_pages, 3);
        assert!(result.affected_cards.is_empty());
        assert_eq!(
            fixture.layout(),
            vec![("card-1".to_string(), 1), ("card-5".to_string(), 5)]
        );
    }

    #[test]
    fn delete_page_removes_its_cards_and_pulls_later_pages() {
        let mut fixture = StoreFixture::new(2, 2, 3).with_cards_at(&[0, 4, 5, 9]);
        let result = run_delete(&mut fixture.store, &main(), 2).unwrap();
        assert_eq!(fixture.reload_binder().total_pages, 2);
        assert_eq!(
            fixture.layout(),
            vec![("card-0".to_string(), 0), ("card-9".to_string(), 5)]
        );
        assert_eq!(
            result.messages[0].content,
            "Deleted page 2 and 2 card(s) on it"
        );
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn delete_refuses_last_remaining_page() {
        let fixture = StoreFixture::new(2, 2, 1);
        assert!(plan_delete(&fixture.store, &main(), 1).is_err());
    }

    #[test]
    fn append_grows_binder() {
        let mut fixture = StoreFixture::new(2, 2, 1).with_cards_at(&[3]);
        run_append(&mut fixture.store, &main(), 2).unwrap();
        let binder = fixture.reload_binder();
        assert_eq!(binder.total_pages, 3);
        assert_eq!(binder.total_slots(), 12);
        assert_eq!(fixture.card_at(3).name, "card-3");
    }

    #[test]
    fn append_past_slot_limit_is_rejected() {
        let fixture = StoreFixture::new(2, 2, 1);
        assert!(matches!(
            plan_append(&fixture.store, &main(), usize::MAX),
            Err(BinderError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            plan_append(&fixture.store, &main(), usize::MAX / 4),
            Err(BinderError::InvalidGeometry { .. })
        ));
        assert_eq!(fixture.reload_binder().total_pages, 1);
    }

    #[test]
    fn append_zero_pages_is_an_error() {
        let fixture = StoreFixture::new(2, 2, 1);
        assert!(plan_append(&fixture.store, &main(), 0).is_err());
    }
}
