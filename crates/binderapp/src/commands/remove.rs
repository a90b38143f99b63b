use crate::address::{BinderSelector, SlotAddress};
use crate::commands::{CmdResult, RemapPlan};
use crate::error::{BinderError, Result};
use crate::slots::{shift_cards, ShiftDirection};
use crate::store::DataStore;

use super::helpers::{card_at, execute, resolve_binder};

/// Take the card at `at` out of the binder. With `shift`, every later card moves
/// back one slot so no gap is left.
pub fn plan<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    at: SlotAddress,
    shift: bool,
) -> Result<RemapPlan> {
    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    let index = at.to_index(&geometry)?;
    let cards = store.list_cards(&binder.id)?;

    let card = card_at(&cards, index)
        .ok_or_else(|| {
            BinderError::Api(format!(
                "No card at slot {}",
                SlotAddress::from_index(index, &geometry)
            ))
        })?
        .clone();

    let summary = if shift {
        format!("Removed {} and closed the gap", card.name)
    } else {
        format!("Removed {}", card.name)
    };

    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.removed.push(card.id);
    plan.after.retain(|p| p.id != card.id);

    if shift {
        let outcome = shift_cards(&plan.after, index, false, geometry.total_slots())?;
        plan.after = outcome.placements;
        plan.direction = Some(ShiftDirection::Delete);
    }
    Ok(plan)
}

pub fn run<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    at: SlotAddress,
    shift: bool,
) -> Result<CmdResult> {
    let plan = plan(store, selector, at, shift)?;
    execute(store, plan)
}
