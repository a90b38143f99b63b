//! # Locating the Data Directory
//!
//! All binders live in one data directory:
//!
//! 1. An explicit override (`--data-dir` or `BINDER_DATA_DIR` in the CLI) wins.
//! 2. Otherwise the OS-appropriate data directory from the `directories` crate,
//!    e.g. `~/.local/share/binder` on Linux.
//!
//! [`initialize`] resolves the directory, loads [`BinderConfig`] from it and opens a
//! [`FileStore`] there. Nothing is written until the first command changes data.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use crate::api::BinderApi;
use crate::config::BinderConfig;
use crate::error::{BinderError, Result};
use crate::store::fs::FileStore;

pub struct BinderContext {
    pub api: BinderApi<FileStore>,
    pub config: BinderConfig,
    pub data_dir: PathBuf,
}

/// The per-user data directory, if the platform has one.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "binder", "binder")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            BinderError::Config(
                "could not determine a data directory; pass --data-dir".to_string(),
            )
        })
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<BinderContext> {
    let data_dir = match data_override {
        Some(path) => path,
        None => default_data_dir()?,
    };
    let config = BinderConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), ?config, "initialized binder context");

    let api = BinderApi::new(FileStore::new(data_dir.clone()));
    Ok(BinderContext {
        api,
        config,
        data_dir,
    })
}
