use crate::address::BinderSelector;
use crate::commands::{BinderView, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::resolve_binder;

pub fn run<S: DataStore>(
    store: &S,
    selector: &BinderSelector,
    page: Option<usize>,
) -> Result<CmdResult> {
    let binder = resolve_binder(store, selector)?;
    let mut cards = store.list_cards(&binder.id)?;

    if let Some(page) = page {
        let geometry = binder.geometry();
        geometry.check_page(page)?;
        let range = geometry.page_range(page);
        cards.retain(|c| range.contains(&c.index));
    }

    Ok(CmdResult::default().with_binder(BinderView { binder, cards, page }))
}
