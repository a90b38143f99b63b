use super::backend::StorageBackend;
use crate::error::{BinderError, Result};
use crate::model::{Binder, Card};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const BINDERS_FILE: &str = "binders.json";
const CARDS_PREFIX: &str = "cards-";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn cards_filename(binder_id: &Uuid) -> String {
        format!("{}{}.json", CARDS_PREFIX, binder_id)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BinderError::Io)?;
        }
        Ok(())
    }

    /// Write to a temp file in the same directory, then rename over the target.
    fn write_atomic<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(BinderError::Serialization)?;
        let tmp_file = self.root.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(BinderError::Io)?;
        fs::rename(&tmp_file, self.root.join(file_name)).map_err(BinderError::Io)?;
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_binders(&self) -> Result<HashMap<Uuid, Binder>> {
        let data_file = self.root.join(BINDERS_FILE);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(BinderError::Io)?;
        let binders: HashMap<Uuid, Binder> =
            serde_json::from_str(&content).map_err(BinderError::Serialization)?;
        Ok(binders)
    }

    fn save_binders(&self, binders: &HashMap<Uuid, Binder>) -> Result<()> {
        self.write_atomic(BINDERS_FILE, binders)
    }

    fn load_cards(&self, binder_id: &Uuid) -> Result<Vec<Card>> {
        let cards_file = self.root.join(Self::cards_filename(binder_id));
        if !cards_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(cards_file).map_err(BinderError::Io)?;
        let cards: Vec<Card> =
            serde_json::from_str(&content).map_err(BinderError::Serialization)?;
        Ok(cards)
    }

    fn save_cards(&self, binder_id: &Uuid, cards: &[Card]) -> Result<()> {
        self.write_atomic(&Self::cards_filename(binder_id), cards)
    }

    fn delete_cards(&self, binder_id: &Uuid) -> Result<()> {
        let cards_file = self.root.join(Self::cards_filename(binder_id));
        if cards_file.exists() {
            fs::remove_file(cards_file).map_err(BinderError::Io)?;
        }
        Ok(())
    }

    fn list_card_files(&self) -> Result<Vec<Uuid>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(BinderError::Io)? {
            let path = entry.map_err(BinderError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if let Some(id) = stem
                .strip_prefix(CARDS_PREFIX)
                .and_then(|part| Uuid::parse_str(part).ok())
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
