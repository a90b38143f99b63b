use crate::commands::helpers::same_name;
use crate::commands::{BinderView, CmdMessage, CmdResult};
use crate::error::{BinderError, Result};
use crate::model::{Binder, Geometry};
use crate::store::DataStore;

/// Names must be non-empty, not a bare number (those select by position) and unique
/// ignoring case.
pub(crate) fn validate_name<S: DataStore>(
    store: &S,
    name: &str,
    except: Option<&Binder>,
) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BinderError::Api("Binder name cannot be empty".to_string()));
    }
    if name.parse::<usize>().is_ok() {
        return Err(BinderError::Api(format!(
            "Binder name cannot be a plain number: {}",
            name
        )));
    }
    let taken = store.list_binders()?.into_iter().any(|b| {
        same_name(&b.name, name) && except.map(|e| e.id != b.id).unwrap_or(true)
    });
    if taken {
        return Err(BinderError::Api(format!(
            "A binder named \"{}\" already exists",
            name
        )));
    }
    Ok(name.to_string())
}

pub fn run<S: DataStore>(store: &mut S, name: &str, geometry: Geometry) -> Result<CmdResult> {
    geometry.validate()?;
    let name = validate_name(store, name, None)?;
    let binder = Binder::new(name, geometry);
    store.save_binder(&binder)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Binder created: {} ({}x{}, {} page(s), {} slots)",
        binder.name,
        binder.rows,
        binder.columns,
        binder.total_pages,
        binder.total_slots()
    )));
    Ok(result.with_binder(BinderView {
        binder,
        cards: Vec::new(),
        page: None,
    }))
}
