//! JSON file backed store.
//!
//! The whole document is read once at open and rewritten on every change
//! (write to a temporary sibling, then rename over the original).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::KeyValueStore;

/// On-disk layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl JsonFileStore {
    /// Open `path`, starting empty when it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match read_document(&path) {
            Ok(Some(doc)) => doc,
            Ok(None) => StoreDocument::default(),
            Err(e) => {
                eprintln!("[Store] {:#}; starting with defaults", e);
                StoreDocument::default()
            }
        };
        Self { path, doc }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &StoreDocument {
        &self.doc
    }

    fn write(&self) -> Result<()> {
        let mut doc = self.doc.clone();
        doc.version = STORE_VERSION;
        let text = serde_json::to_string_pretty(&doc).context("encode store document")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, text).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Option<StoreDocument>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc = serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(doc))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.doc.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.doc.entries.insert(key.to_string(), value);
        self.write()
    }
}
