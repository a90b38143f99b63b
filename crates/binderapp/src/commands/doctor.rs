use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.relocated_cards == 0 && report.unplaced_cards == 0 && report.removed_orphan_files == 0
    {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    if report.relocated_cards > 0 {
        result.add_message(CmdMessage::success(format!(
            "  - Moved {} card(s) off a shared or out-of-range slot.",
            report.relocated_cards
        )));
    }
    if report.unplaced_cards > 0 {
        result.add_message(CmdMessage::error(format!(
            "  - {} card(s) need a slot but their binder is full. Add pages and run doctor again.",
            report.unplaced_cards
        )));
    }
    if report.removed_orphan_files > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - Removed {} card file(s) of deleted binders.",
            report.removed_orphan_files
        )));
    }
    Ok(result)
}
