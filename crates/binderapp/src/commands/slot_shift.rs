use crate::address::{BinderSelector, SlotAddress};
use crate::commands::{CmdResult, RemapPlan};
use crate::error::{BinderError, Result};
use crate::slots::{shift_cards, ShiftDirection};
use crate::store::DataStore;

use super::helpers::{card_at, execute, resolve_binder};

/// Open an empty slot at `at` by pushing it and every later card forward one slot.
/// Cards pushed past the last slot leave the binder and are reported.
pub fn plan_insert<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    at: SlotAddress,
) -> Result<RemapPlan> {
    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    let index = at.to_index(&geometry)?;
    let cards = store.list_cards(&binder.id)?;

    let summary = format!(
        "Opened an empty slot at {}",
        SlotAddress::from_index(index, &geometry)
    );
    let mut plan = RemapPlan::new(binder, cards, summary);
    let outcome = shift_cards(&plan.before, index, true, geometry.total_slots())?;
    plan.after = outcome.placements;
    plan.dropped = outcome.dropped;
    plan.direction = Some(ShiftDirection::Insert);
    Ok(plan)
}

/// Close the empty slot at `at` by pulling every later card back one slot.
pub fn plan_close<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    at: SlotAddress,
) -> Result<RemapPlan> {
    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    let index = at.to_index(&geometry)?;
    let cards = store.list_cards(&binder.id)?;
    let address = SlotAddress::from_index(index, &geometry);

    if let Some(occupant) = card_at(&cards, index) {
        return Err(BinderError::Api(format!(
            "Slot {} holds {}; remove it with --shift instead",
            address, occupant.name
        )));
    }

    let mut plan = RemapPlan::new(binder, cards, format!("Closed the slot at {}", address));
    let outcome = shift_cards(&plan.before, index, false, geometry.total_slots())?;
    plan.after = outcome.placements;
    plan.direction = Some(ShiftDirection::Delete);
    Ok(plan)
}

pub fn run_insert<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    at: SlotAddress,
) -> Result<CmdResult> {
    let plan = plan_insert(store, selector, at)?;
    execute(store, plan)
}

pub fn run_close<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    at: SlotAddress,
) -> Result<CmdResult> {
    let plan = plan_close(store, selector, at)?;
    execute(store, plan)
}
