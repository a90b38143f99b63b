//! # Configuration
//!
//! Binder configuration is loaded with [`confique`] from two layers:
//!
//! 1. **Environment variables**: `BINDER_DEFAULT_ROWS`, `BINDER_DEFAULT_COLUMNS`,
//!    `BINDER_DEFAULT_PAGES`.
//! 2. **Config file**: `binder.toml` in the data directory.
//!
//! Anything not set falls back to the compiled defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_rows` | `3` | Rows per page for `binder create` |
//! | `default_columns` | `3` | Columns per page for `binder create` |
//! | `default_pages` | `10` | Pages in a new binder |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::{BinderError, Result};
use crate::model::Geometry;

pub const CONFIG_FILE: &str = "binder.toml";

/// Configuration for binder, stored in `binder.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BinderConfig {
    /// Rows per page for new binders.
    #[config(env = "BINDER_DEFAULT_ROWS", default = 3)]
    pub default_rows: usize,

    /// Columns per page for new binders.
    #[config(env = "BINDER_DEFAULT_COLUMNS", default = 3)]
    pub default_columns: usize,

    /// Number of pages in a new binder.
    #[config(env = "BINDER_DEFAULT_PAGES", default = 10)]
    pub default_pages: usize,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            default_rows: 3,
            default_columns: 3,
            default_pages: 10,
        }
    }
}

impl BinderConfig {
    /// Load from the environment, then `binder.toml` under `data_dir`. A missing
    /// file is fine; an unreadable or invalid one is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE))
            .load()
            .map_err(|e| BinderError::Config(e.to_string()))
    }

    /// Geometry for a new binder, with explicit values taking precedence.
    pub fn geometry(
        &self,
        rows: Option<usize>,
        columns: Option<usize>,
        pages: Option<usize>,
    ) -> Result<Geometry> {
        Geometry::new(
            rows.unwrap_or(self.default_rows),
            columns.unwrap_or(self.default_columns),
            pages.unwrap_or(self.default_pages),
        )
    }

    /// A commented `binder.toml` listing every key and its default.
    pub fn template() -> String {
        confique::toml::template::<BinderConfig>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_three_by_three_with_ten_pages() {
        let config = BinderConfig::default();
        let geometry = config.geometry(None, None, None).unwrap();
        assert_eq!(geometry, Geometry::new(3, 3, 10).unwrap());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = BinderConfig::default();
        let geometry = config.geometry(Some(4), None, Some(2)).unwrap();
        assert_eq!(geometry.rows, 4);
        assert_eq!(geometry.columns, 3);
        assert_eq!(geometry.total_pages, 2);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let config = BinderConfig {
            default_pages: 0,
            ..Default::default()
        };
        assert!(config.geometry(None, None, None).is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "default_rows = 4\ndefault_columns = 2\n",
        )
        .unwrap();
        let config = BinderConfig::load(dir.path()).unwrap();
        assert_eq!(config.default_columns, 2);
        assert_eq!(config.default_pages, 10);
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "default_rows = \"many\"\n").unwrap();
        assert!(matches!(
            BinderConfig::load(dir.path()),
            Err(BinderError::Config(_))
        ));
    }

    #[test]
    fn template_mentions_every_key() {
        let template = BinderConfig::template();
        assert!(template.contains("default_rows"));
        assert!(template.contains("default_columns"));
        assert!(template.contains("default_pages"));
    }
}
