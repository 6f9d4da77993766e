use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::StoreError;
use crate::paths::write_atomic;

/// language code -> (translation key -> translation value)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TranslationDocument {
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationDocument {
    /// A document with one empty mapping per language.
    pub fn with_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages = languages
            .into_iter()
            .map(|lang| (lang.into(), BTreeMap::new()))
            .collect();
        Self { languages }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(path.to_path_buf())
            } else {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Unparsable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rewrites the whole file as compact JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_vec(self).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
        write_atomic(path, &json)
    }

    /// Sets `language.key = value`. Never creates a language.
    pub fn set(&mut self, language: &str, key: &str, value: &str) -> Option<Option<String>> {
        self.languages
            .get_mut(language)
            .map(|entries| entries.insert(key.to_string(), value.to_string()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }
}
