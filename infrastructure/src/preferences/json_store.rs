//! JSON file preference store.
//!
//! The whole store is one JSON document:
//!
//! ```json
//! {
//!   "updated_at": "2026-10-19T08:30:00.000Z",
//!   "values": { "<setting key>": 2 }
//! }
//! ```
//!
//! Writes are staged in memory. `commit` rewrites the document through a
//! temporary sibling file and renames it into place, so the next process
//! sees either the old or the new document.

use envswitch_application::{PersistenceError, PreferenceStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceDocument {
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    values: BTreeMap<String, i64>,
}

#[derive(Default)]
struct StoreState {
    committed: BTreeMap<String, i64>,
    staged: BTreeMap<String, i64>,
}

/// File-backed preference store.
pub struct JsonPreferenceStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonPreferenceStore {
    /// Open the store at `path`, loading any committed values.
    ///
    /// A missing file is an empty store; it is created on first commit.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let committed = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
            let document: PreferenceDocument =
                serde_json::from_str(&content).map_err(|e| read_error(&path, e))?;
            document.values
        } else {
            BTreeMap::new()
        };

        debug!(
            "Opened preference store {} with {} values",
            path.display(),
            committed.len()
        );
        Ok(Self {
            path,
            state: Mutex::new(StoreState {
                committed,
                staged: BTreeMap::new(),
            }),
        })
    }

    /// Get the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::Unavailable("preference store lock poisoned".to_string()))
    }

    fn write_document(&self, values: &BTreeMap<String, i64>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| write_error(&self.path, e))?;
        }

        let document = PreferenceDocument {
            updated_at: Some(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
            values: values.clone(),
        };

        let temp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&temp_path).map_err(|e| write_error(&temp_path, e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &document)
                .map_err(|e| write_error(&temp_path, e))?;
            writer.flush().map_err(|e| write_error(&temp_path, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| write_error(&temp_path, e))?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| write_error(&self.path, e))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_long(&self, key: &str, default: i64) -> Result<i64, PersistenceError> {
        Ok(self.lock()?.committed.get(key).copied().unwrap_or(default))
    }

    fn put_long(&self, key: &str, value: i64) -> Result<(), PersistenceError> {
        self.lock()?.staged.insert(key.to_string(), value);
        Ok(())
    }

    fn commit(&self) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        if state.staged.is_empty() {
            return Ok(());
        }

        let mut values = state.committed.clone();
        values.extend(std::mem::take(&mut state.staged));
        // Staged values are dropped even when the write fails.
        self.write_document(&values)?;

        debug!(
            "Committed {} preference values to {}",
            values.len(),
            self.path.display()
        );
        state.committed = values;
        Ok(())
    }
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Read {
        location: path.display().to_string(),
        message: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Write {
        location: path.display().to_string(),
        message: e.to_string(),
    }
}
