use crate::address::{BinderSelector, SlotAddress};
use crate::commands::{CmdResult, RemapPlan};
use crate::error::{BinderError, Result};
use crate::model::Placement;
use crate::store::DataStore;

use super::helpers::{card_at, execute, resolve_binder};

/// Move the card at `from` to `to`. If `to` is taken the two cards trade places.
pub fn plan<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    from: SlotAddress,
    to: SlotAddress,
) -> Result<RemapPlan> {
    let binder = resolve_binder(store, selector)?;
    let geometry = binder.geometry();
    let from_index = from.to_index(&geometry)?;
    let to_index = to.to_index(&geometry)?;
    let cards = store.list_cards(&binder.id)?;

    let moving = card_at(&cards, from_index)
        .ok_or_else(|| {
            BinderError::Api(format!(
                "No card at slot {}",
                SlotAddress::from_index(from_index, &geometry)
            ))
        })?
        .clone();
    let occupant = card_at(&cards, to_index)
        .filter(|c| c.id != moving.id)
        .cloned();

    let destination = SlotAddress::from_index(to_index, &geometry);
    let summary = match &occupant {
        Some(other) => format!("Swapped {} with {}", moving.name, other.name),
        None => format!("Moved {} to {}", moving.name, destination),
    };

    let mut plan = RemapPlan::new(binder, cards, summary);
    plan.after = plan
        .before
        .iter()
        .map(|p| {
            if p.id == moving.id {
                Placement::new(p.id, to_index)
            } else if occupant.as_ref().map(|o| o.id) == Some(p.id) {
                Placement::new(p.id, from_index)
            } else {
                *p
            }
        })
        .collect();
    Ok(plan)
}

pub fn run<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    from: SlotAddress,
    to: SlotAddress,
) -> Result<CmdResult> {
    let plan = plan(store, selector, from, to)?;
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
    fn moves_into_empty_slot() {
        let mut fixture = StoreFixture::new(2, 2, 2).with_cards_at(&[0]);
        let result = run(
            &mut fixture.store,
            &main(),
            SlotAddress::Absolute(1),
            SlotAddress::PageSlot { page: 2, slot: 2 },
        )
        .unwrap();
        assert_eq!(fixture.layout(), vec![("card-0".to_string(), 5)]);
        assert_eq!(result.affected_cards.len(), 1);
        assert_eq!(result.affected_cards[0].previous_index, Some(0));
        assert_eq!(result.messages[0].content, "Moved card-0 to 2:2");
    }

    #[test]
    fn swaps_with_occupant() {
        let mut fixture = StoreFixture::new(2, 2, 1).with_cards_at(&[0, 3]);
        let result = run(
            &mut fixture.store,
            &main(),
            SlotAddress::Absolute(1),
            SlotAddress::Absolute(4),
        )
        .unwrap();
        assert_eq!(
            fixture.layout(),
            vec![("card-3".to_string(), 0), ("card-0".to_string(), 3)]
        );
        assert_eq!(result.affected_cards.len(), 2);
        assert!(result.messages[0].content.starts_with("Swapped"));
    }

    #[test]
    fn same_slot_is_a_noop() {
        let mut fixture = StoreFixture::new(2, 2, 1).with_cards_at(&[1]);
        let result = run(
            &mut fixture.store,
            &main(),
            SlotAddress::Absolute(2),
            SlotAddress::PageSlot { page: 1, slot: 2 },
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "Nothing to change");
    }

    #[test]
    fn empty_source_is_an_error() {
        let fixture = StoreFixture::new(2, 2, 1);
        let err = plan(
            &fixture.store,
            &main(),
            SlotAddress::Absolute(1),
            SlotAddress::Absolute(2),
        )
        .unwrap_err();
        assert!(err.to_string().contains("No card at slot 1:1"));
    }
}
