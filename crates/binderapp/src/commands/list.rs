use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::indexed_binders;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let listed = indexed_binders(store)?;
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No binders yet. Create one with `binder create`."));
    }
    Ok(result.with_listed_binders(listed))
}
