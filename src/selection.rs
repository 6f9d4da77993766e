use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::paths::write_atomic;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub path: PathBuf,              // Absolute path of the selected document
    #[serde(default)]
    pub protected: bool,            // Only `select`/`create` may replace it
    pub selected_at: DateTime<Utc>, // When it was selected
}

impl SelectionEntry {
    pub fn protected(path: PathBuf) -> Self {
        Self {
            path,
            protected: true,
            selected_at: Utc::now(),
        }
    }
}

/// Where the "currently selected" document is remembered between runs.
pub trait SelectionStore {
    fn get(&self) -> Result<Option<SelectionEntry>, StoreError>;
    fn set(&self, entry: SelectionEntry) -> Result<(), StoreError>;
}

/// Keeps the selection as JSON in a small state file.
pub struct FileSelectionStore {
    state_path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(state_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
        }
    }
}

impl SelectionStore for FileSelectionStore {
    fn get(&self) -> Result<Option<SelectionEntry>, StoreError> {
        let content = match fs::read_to_string(&self.state_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.state_path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Unparsable {
                path: self.state_path.clone(),
                source,
            })
    }

    fn set(&self, entry: SelectionEntry) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&entry).map_err(|source| StoreError::Write {
            path: self.state_path.clone(),
            source: source.into(),
        })?;
        write_atomic(&self.state_path, &json)
    }
}

/// Process-local selection used by tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySelectionStore {
    entry: std::cell::RefCell<Option<SelectionEntry>>,
}

#[cfg(test)]
impl SelectionStore for MemorySelectionStore {
    fn get(&self) -> Result<Option<SelectionEntry>, StoreError> {
        Ok(self.entry.borrow().clone())
    }

    fn set(&self, entry: SelectionEntry) -> Result<(), StoreError> {
        *self.entry.borrow_mut() = Some(entry);
        Ok(())
    }
}
