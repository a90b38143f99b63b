use crate::address::BinderSelector;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::resolve_binder;

pub fn run<S: DataStore>(store: &mut S, selector: &BinderSelector) -> Result<CmdResult> {
    let binder = resolve_binder(store, selector)?;
    let card_count = store.list_cards(&binder.id)?.len();
    store.delete_binder(&binder.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Binder deleted: {} ({} card(s))",
        binder.name, card_count
    )));
    Ok(result)
}
