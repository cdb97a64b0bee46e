//! JSON-backed category and counterparty lists.
//!
//! The file keeps the keys of the historical data files (`gasto`,
//! `ingreso`, `quien`) and is created empty on first read so a fresh
//! install has something to edit.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::EntryKind;
use crate::errors::Result;
use crate::storage::ReferenceStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    gasto: Vec<String>,
    #[serde(default)]
    ingreso: Vec<String>,
    #[serde(default)]
    quien: Vec<String>,
}

/// Reference lists stored as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonReferenceData {
    path: PathBuf,
}

impl JsonReferenceData {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_or_init(&self) -> Result<ReferenceFile> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let empty = serde_json::to_string_pretty(&ReferenceFile::default())?;
            fs::write(&self.path, empty)?;
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl ReferenceStore for JsonReferenceData {
    fn categories(&self, kind: EntryKind) -> Result<Vec<String>> {
        let file = self.load_or_init()?;
        Ok(match kind {
            EntryKind::Expense => file.gasto,
            EntryKind::Income => file.ingreso,
        })
    }

    fn counterparties(&self) -> Result<Vec<String>> {
        Ok(self.load_or_init()?.quien)
    }
}
