use super::binder_store::BinderStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = BinderStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        BinderStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---
