use crate::address::BinderSelector;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use chrono::Utc;

use super::create::validate_name;
use super::helpers::resolve_binder;

pub fn run<S: DataStore>(
    store: &mut S,
    selector: &BinderSelector,
    new_name: &str,
) -> Result<CmdResult> {
    let mut binder = resolve_binder(store, selector)?;
    let new_name = validate_name(store, new_name, Some(&binder))?;
    let old_name = std::mem::replace(&mut binder.name, new_name);
    binder.updated_at = Utc::now();
    store.save_binder(&binder)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Binder renamed: {} -> {}",
        old_name, binder.name
    )));
    Ok(result)
}
