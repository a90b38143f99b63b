use crate::address::{BinderSelector, SlotAddress};
use crate::commands::{CmdMessage, CmdResult, ListedBinder, RemapPlan, SlottedCard};
use crate::error::{BinderError, Result};
use crate::model::{Binder, Card};
use crate::store::DataStore;
use std::collections::HashMap;
use tracing::warn;

/// All binders in canonical order (oldest first, then by name), numbered from 1.
pub fn indexed_binders<S: DataStore>(store: &S) -> Result<Vec<ListedBinder>> {
    let mut binders = store.list_binders()?;
    binders.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });

    binders
        .into_iter()
        .enumerate()
        .map(|(i, binder)| {
            let card_count = store.list_cards(&binder.id)?.len();
            Ok(ListedBinder {
                position: i + 1,
                binder,
                card_count,
            })
        })
        .collect()
}

/// Binder names compare with full Unicode lowercasing, so "Élan" and "élan" are one name.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn resolve_binder<S: DataStore>(store: &S, selector: &BinderSelector) -> Result<Binder> {
    let listed = indexed_binders(store)?;
    match selector {
        BinderSelector::Position(n) => listed
            .into_iter()
            .find(|lb| lb.position == *n)
            .map(|lb| lb.binder)
            .ok_or_else(|| BinderError::Api(format!("Binder {} not found", n))),
        BinderSelector::Name(name) => {
            let mut matches: Vec<Binder> = listed
                .into_iter()
                .filter(|lb| same_name(&lb.binder.name, name))
                .map(|lb| lb.binder)
                .collect();
            match matches.len() {
                0 => Err(BinderError::Api(format!("No binder named \"{}\"", name))),
                1 => Ok(matches.remove(0)),
                n => Err(BinderError::Api(format!(
                    "\"{}\" matches {} binders, use its number instead",
                    name, n
                ))),
            }
        }
    }
}

pub fn card_at(cards: &[Card], index: usize) -> Option<&Card> {
    cards.iter().find(|c| c.index == index)
}

pub fn slotted(card: Card, binder: &Binder, previous_index: Option<usize>) -> SlottedCard {
    let geometry = binder.geometry();
    SlottedCard {
        address: SlotAddress::from_index(card.index, &geometry),
        previous_address: previous_index.map(|i| SlotAddress::from_index(i, &geometry)),
        card,
        previous_index,
    }
}

/// Persist a plan as one index batch, page count change included.
pub fn commit<S: DataStore>(store: &mut S, plan: &RemapPlan) -> Result<()> {
    store.apply_index_batch(&plan.binder.id, &plan.batch())
}

/// Build the result of a committed plan: moved cards with their old index, plus
/// messages for the summary and any cards that fell out.
pub fn report<S: DataStore>(store: &S, plan: &RemapPlan) -> Result<CmdResult> {
    let previous: HashMap<_, _> = plan.before.iter().map(|p| (p.id, p.index)).collect();
    let moved: Vec<SlottedCard> = store
        .list_cards(&plan.binder.id)?
        .into_iter()
        .filter_map(|card| {
            let old = previous.get(&card.id).copied();
            (old != Some(card.index)).then(|| slotted(card, &plan.binder, old))
        })
        .collect();

    let mut result = CmdResult::default().with_affected_cards(moved);
    result.add_message(CmdMessage::success(plan.summary.clone()));
    for note in &plan.notes {
        result.add_message(CmdMessage::info(note.clone()));
    }

    if !plan.dropped.is_empty() {
        let names: Vec<&str> = plan
            .dropped
            .iter()
            .filter_map(|id| plan.card(id))
            .map(|c| c.name.as_str())
            .collect();
        warn!(binder = %plan.binder.id, dropped = plan.dropped.len(), "cards pushed out of binder");
        result.add_message(CmdMessage::warning(format!(
            "{} card(s) no longer fit and were removed: {}",
            plan.dropped.len(),
            names.join(", ")
        )));
    }
    Ok(result)
}

/// Commit then report, or report a no-op without writing.
pub fn execute<S: DataStore>(store: &mut S, plan: RemapPlan) -> Result<CmdResult> {
    if plan.is_noop() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result);
    }
    commit(store, &plan)?;
    report(store, &plan)
}
