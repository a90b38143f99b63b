use super::binder_store::BinderStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production store: JSON files under a data directory.
pub type FileStore = BinderStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        BinderStore::with_backend(FsBackend::new(root))
    }
}
