use crate::address::{BinderSelector, SlotAddress};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BinderError, Result};
use crate::model::{placements, Card};
use crate::slots::first_free_slot;
use crate::store::DataStore;

use super::helpers::{card_at, resolve_binder, slotted};

/// What the user knows about a card when filing it.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub name: String,
    pub set_code: Option<String>,
    pub number: Option<String>,
}

impl NewCard {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// File a new card at `at`, or in the first free slot when `at` is `None`.
pub fn run<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    new_card: NewCard,
    at: Option<SlotAddress>,
) -> Result<CmdResult> {
    let name = new_card.name.trim();
    if name.is_empty() {
        return Err(BinderError::Api("Card name cannot be empty".to_string()));
    }

    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    let cards = store.list_cards(&binder.id)?;

    let index = match at {
        Some(address) => {
            let index = address.to_index(&geometry)?;
            if let Some(occupant) = card_at(&cards, index) {
                return Err(BinderError::Api(format!(
                    "Slot {} already holds {}",
                    SlotAddress::from_index(index, &geometry),
                    occupant.name
                )));
            }
            index
        }
        None => first_free_slot(&placements(&cards), geometry.total_slots()).ok_or_else(|| {
            BinderError::Api(format!(
                "Binder {} is full ({} slots)",
                binder.name,
                geometry.total_slots()
            ))
        })?,
    };

    let card = Card::new(binder.id, name.to_string(), index)
        .with_set(new_card.set_code, new_card.number);
    store.save_card(&card)?;

    let placed = slotted(card, &binder, None);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Placed {} at {}",
        placed.card.name, placed.address
    )));
    Ok(result.with_affected_cards(vec![placed]))
}
