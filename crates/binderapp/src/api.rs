//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for all binder operations, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Parses user input**: binder selectors, slot addresses (`N`, `P:S`), page numbers
//! - **Dispatches** to the command functions
//! - **Keeps the placement cache** in step with the store
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and holds no business logic.
//!
//! ## Optimistic Updates
//!
//! Commands that move cards come as a plan and a commit. The facade applies the
//! planned placements to its [`PlacementCache`] first and only then commits; if the
//! commit fails, the cache is rolled back to its snapshot and the error returned.
//! The store stays the source of truth: [`BinderApi::view_binder`] reloads the cache.
//!
//! ## Generic Over DataStore
//!
//! `BinderApi<S: DataStore>` works with any store:
//! - Production: `BinderApi<FileStore>`
//! - Testing: `BinderApi<InMemoryStore>`

use uuid::Uuid;

use crate::address::{parse_page, BinderSelector, SlotAddress};
use crate::cache::PlacementCache;
use crate::commands::{self, helpers, CmdResult, RemapPlan};
use crate::error::Result;
use crate::model::{placements, Geometry, Placement};
use crate::store::DataStore;

pub use crate::commands::pages::InsertPosition;
pub use crate::commands::place::NewCard;

pub struct BinderApi<S: DataStore> {
    store: S,
    cache: PlacementCache,
}

impl<S: DataStore> BinderApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: PlacementCache::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached placements of a binder, if it has been viewed or changed.
    pub fn cached_placements(&self, binder_id: &Uuid) -> Option<&[Placement]> {
        self.cache.get(binder_id)
    }

    pub fn create_binder(&mut self, name: &str, geometry: Geometry) -> Result<CmdResult> {
        commands::create::run(&mut self.store, name, geometry)
    }

    pub fn list_binders(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_binder(&mut self, binder: &str, page: Option<&str>) -> Result<CmdResult> {
        let page = page.map(parse_page).transpose()?;
        let result = commands::view::run(&self.store, &BinderSelector::parse(binder), page)?;
        if let Some(view) = &result.binder {
            let cards = self.store.list_cards(&view.binder.id)?;
            self.cache.load(view.binder.id, placements(&cards));
        }
        Ok(result)
    }

    pub fn rename_binder(&mut self, binder: &str, new_name: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.store, &BinderSelector::parse(binder), new_name)
    }

    pub fn delete_binder(&mut self, binder: &str) -> Result<CmdResult> {
        let selector = BinderSelector::parse(binder);
        let id = helpers::resolve_binder(&self.store, &selector)?.id;
        let result = commands::delete::run(&mut self.store, &selector)?;
        self.cache.invalidate(&id);
        Ok(result)
    }

    pub fn place_card(
        &mut self,
        binder: &str,
        card: NewCard,
        at: Option<&str>,
    ) -> Result<CmdResult> {
        let at = at.map(str::parse::<SlotAddress>).transpose()?;
        let result = commands::place::run(&mut self.store, &BinderSelector::parse(binder), card, at)?;
        for placed in &result.affected_cards {
            self.cache.invalidate(&placed.card.binder_id);
        }
        Ok(result)
    }

    pub fn move_card(&mut self, binder: &str, from: &str, to: &str) -> Result<CmdResult> {
        let plan = commands::move_card::plan(
            &self.store,
            &BinderSelector::parse(binder),
            from.parse()?,
            to.parse()?,
        )?;
        self.commit(plan)
    }

    pub fn remove_card(&mut self, binder: &str, at: &str, shift: bool) -> Result<CmdResult> {
        let plan =
            commands::remove::plan(&self.store, &BinderSelector::parse(binder), at.parse()?, shift)?;
        self.commit(plan)
    }

    pub fn insert_slot(&mut self, binder: &str, at: &str) -> Result<CmdResult> {
        let plan =
            commands::slot_shift::plan_insert(&self.store, &BinderSelector::parse(binder), at.parse()?)?;
        self.commit(plan)
    }

    pub fn close_slot(&mut self, binder: &str, at: &str) -> Result<CmdResult> {
        let plan =
            commands::slot_shift::plan_close(&self.store, &BinderSelector::parse(binder), at.parse()?)?;
        self.commit(plan)
    }

    /// Move one page. Ranges and lists are refused.
    pub fn move_page(&mut self, binder: &str, source: &str, target: &str) -> Result<CmdResult> {
        let plan = commands::pages::plan_move(
            &self.store,
            &BinderSelector::parse(binder),
            parse_page(source)?,
            parse_page(target)?,
        )?;
        self.commit(plan)
    }

    pub fn insert_page(
        &mut self,
        binder: &str,
        page: &str,
        position: InsertPosition,
    ) -> Result<CmdResult> {
        let plan = commands::pages::plan_insert(
            &self.store,
            &BinderSelector::parse(binder),
            parse_page(page)?,
            position,
        )?;
        self.commit(plan)
    }

    pub fn delete_page(&mut self, binder: &str, page: &str) -> Result<CmdResult> {
        let plan = commands::pages::plan_delete(
            &self.store,
            &BinderSelector::parse(binder),
            parse_page(page)?,
        )?;
        self.commit(plan)
    }

    pub fn append_pages(&mut self, binder: &str, count: usize) -> Result<CmdResult> {
        let plan =
            commands::pages::plan_append(&self.store, &BinderSelector::parse(binder), count)?;
        self.commit(plan)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        let result = commands::doctor::run(&mut self.store)?;
        self.cache.clear();
        Ok(result)
    }

    /// Apply the plan to the cache, commit it, and roll the cache back on failure.
    fn commit(&mut self, plan: RemapPlan) -> Result<CmdResult> {
        if plan.is_noop() {
            return helpers::execute(&mut self.store, plan);
        }
        let store = &mut self.store;
        self.cache
            .optimistic(plan.binder.id, plan.after.clone(), || {
                helpers::commit(store, &plan)
            })?;
        helpers::report(&self.store, &plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BinderError;
    use crate::store::binder_store::BinderStore;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryStore;

    fn api_with_cards(indices: &[usize]) -> (BinderApi<InMemoryStore>, Uuid) {
        let mut api = BinderApi::new(BinderStore::with_backend(MemBackend::new()));
        api.create_binder("Main", Geometry::new(2, 2, 3).unwrap())
            .unwrap();
        for &index in indices {
            let at = (index + 1).to_string();
            api.place_card("1", NewCard::named(format!("card-{}", index)), Some(at.as_str()))
                .unwrap();
        }
        let id = api.store().list_binders().unwrap()[0].id;
        (api, id)
    }

    fn indices(api: &BinderApi<InMemoryStore>, id: &Uuid) -> Vec<(String, usize)> {
        api.store()
            .list_cards(id)
            .unwrap()
            .into_iter()
            .map(|c| (c.name, c.index))
            .collect()
    }

    #[test]
    fn view_loads_cache() {
        let (mut api, id) = api_with_cards(&[0, 5]);
        assert!(api.cached_placements(&id).is_none());
        api.view_binder("Main", None).unwrap();
        assert_eq!(api.cached_placements(&id).unwrap().len(), 2);
    }

    #[test]
    fn view_page_rejects_ranges() {
        let (mut api, _) = api_with_cards(&[]);
        assert!(matches!(
            api.view_binder("1", Some("1-2")),
            Err(BinderError::MultiPageMove(_))
        ));
    }

    #[test]
    fn move_page_updates_store_and_cache() {
        let (mut api, id) = api_with_cards(&[0, 4, 8]);
        api.view_binder("1", None).unwrap();

        api.move_page("1", "3", "1").unwrap();

        assert_eq!(
            indices(&api, &id),
            vec![
                ("card-8".to_string(), 0),
                ("card-0".to_string(), 4),
                ("card-4".to_string(), 8),
            ]
        );
        let mut cached: Vec<usize> = api
            .cached_placements(&id)
            .unwrap()
            .iter()
            .map(|p| p.index)
            .collect();
        cached.sort_unstable();
        assert_eq!(cached, vec![0, 4, 8]);
    }

    #[test]
    fn failed_write_rolls_back_cache() {
        let (mut api, id) = api_with_cards(&[0, 4]);
        api.view_binder("1", None).unwrap();
        let before = api.cached_placements(&id).unwrap().to_vec();

        api.store().backend().set_simulate_write_error(true);
        let err = api.move_page("1", "1", "3").unwrap_err();

        assert!(matches!(err, BinderError::BatchWrite { .. }));
        assert_eq!(api.cached_placements(&id).unwrap(), before.as_slice());
        api.store().backend().set_simulate_write_error(false);
        assert_eq!(
            indices(&api, &id),
            vec![("card-0".to_string(), 0), ("card-4".to_string(), 4)]
        );
    }

    #[test]
    fn failed_page_count_write_keeps_cache_and_store_in_step() {
        let (mut api, id) = api_with_cards(&[0, 4, 8]);
        api.view_binder("1", None).unwrap();
        let before = api.cached_placements(&id).unwrap().to_vec();

        // Card file write goes through, binder index write fails.
        api.store().backend().fail_nth_write(2);
        let err = api.delete_page("1", "2").unwrap_err();

        assert!(matches!(err, BinderError::BatchWrite { failed: 3, .. }));
        assert_eq!(api.cached_placements(&id).unwrap(), before.as_slice());
        assert_eq!(api.store().get_binder(&id).unwrap().total_pages, 3);
        let stored: Vec<Placement> = api
            .store()
            .list_cards(&id)
            .unwrap()
            .iter()
            .map(|c| c.placement())
            .collect();
        assert_eq!(stored, before);
    }

    #[test]
    fn multi_page_move_is_rejected() {
        let (mut api, _) = api_with_cards(&[0]);
        assert!(matches!(
            api.move_page("1", "1-2", "3"),
            Err(BinderError::MultiPageMove(_))
        ));
        assert!(matches!(
            api.move_page("1", "1", "2,3"),
            Err(BinderError::MultiPageMove(_))
        ));
    }

    #[test]
    fn noop_move_leaves_cache_alone() {
        let (mut api, id) = api_with_cards(&[0]);
        let result = api.move_page("1", "2", "2").unwrap();
        assert_eq!(result.messages[0].content, "Nothing to change");
        assert!(api.cached_placements(&id).is_none());
    }

    #[test]
    fn place_invalidates_cache() {
        let (mut api, id) = api_with_cards(&[0]);
        api.view_binder("1", None).unwrap();
        api.place_card("1", NewCard::named("Mew"), None).unwrap();
        assert!(api.cached_placements(&id).is_none());
    }

    #[test]
    fn delete_page_and_append_through_api() {
        let (mut api, id) = api_with_cards(&[0, 4, 8]);
        api.delete_page("Main", "2").unwrap();
        api.append_pages("Main", 1).unwrap();
        api.insert_page("Main", "1", InsertPosition::Before).unwrap();

        let binder = api.store().get_binder(&id).unwrap();
        assert_eq!(binder.total_pages, 4);
        assert_eq!(
            indices(&api, &id),
            vec![("card-0".to_string(), 4), ("card-8".to_string(), 8)]
        );
    }

    #[test]
    fn slot_commands_through_api() {
        let (mut api, id) = api_with_cards(&[0, 1]);
        api.insert_slot("1", "1:1").unwrap();
        api.close_slot("1", "1").unwrap();
        api.move_card("1", "1", "2:1").unwrap();
        api.remove_card("1", "2", true).unwrap();
        assert_eq!(indices(&api, &id), vec![("card-0".to_string(), 3)]);
    }
}
