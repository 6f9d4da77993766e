use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::i18n::I18n;
use crate::paths::is_valid_path;
use crate::selection::{SelectionEntry, SelectionStore};
use crate::storage::TranslationDocument;

pub struct StoreManager {
    selection: Box<dyn SelectionStore>,
    default_file: PathBuf,
}

impl StoreManager {
    pub fn new(selection: Box<dyn SelectionStore>, default_file: PathBuf) -> Self {
        Self {
            selection,
            default_file,
        }
    }

    /// Writes a new document with one empty mapping per language, then makes
    /// it the selected document. Never overwrites an existing file.
    pub fn create(&self, path: Option<&str>, languages: &[String], i18n: &I18n) -> Result<PathBuf, StoreError> {
        if languages.is_empty() {
            return Err(StoreError::Config("error_no_languages"));
        }

        let path = match path {
            Some(p) if is_valid_path(p) => PathBuf::from(p),
            Some(_) => return Err(StoreError::InvalidPath("error_path_invalid")),
            None => self.default_file.clone(),
        };

        if path.exists() {
            return Err(StoreError::AlreadyExists(path));
        }

        let mut declared: Vec<&str> = Vec::with_capacity(languages.len());
        for lang in languages {
            if !declared.contains(&lang.as_str()) {
                declared.push(lang);
            }
        }

        TranslationDocument::with_languages(declared.iter().copied()).save(&path)?;

        println!(
            "{}",
            i18n.t_format("created_file", &[&path.display().to_string(), &declared.join(", ")]).green()
        );

        self.select(&path, false, i18n)?;
        Ok(path)
    }

    /// Remembers the absolute form of `path` as the selected document.
    pub fn select(&self, path: &Path, announce: bool, i18n: &I18n) -> Result<PathBuf, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let absolute = fs::canonicalize(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.selection.set(SelectionEntry::protected(absolute.clone()))?;

        if announce {
            println!(
                "{}",
                i18n.t_format("selected_file", &[&absolute.display().to_string()]).green()
            );
        }
        Ok(absolute)
    }

    /// Sets `document[language][key] = value` and rewrites the document.
    /// The file is left untouched when `language` is not declared in it.
    pub fn insert(&self, path: &Path, key: &str, language: &str, value: &str, i18n: &I18n) -> Result<(), StoreError> {
        let mut document = TranslationDocument::load(path)?;

        if document.set(language, key, value).is_none() {
            return Err(StoreError::UnknownLanguage {
                language: language.to_string(),
                path: path.to_path_buf(),
                available: document.languages().collect::<Vec<_>>().join(", "),
            });
        }

        document.save(path)?;

        println!(
            "{}",
            i18n.t_format("added_key", &[key, &path.display().to_string()]).green()
        );
        Ok(())
    }

    /// One full `insert` per value, in order: the last value ends up stored.
    /// Stops at the first failure.
    pub fn bulk_insert(&self, path: &Path, key: &str, language: &str, values: &[String], i18n: &I18n) -> Result<(), StoreError> {
        for value in values {
            self.insert(path, key, language, value, i18n)?;
        }
        Ok(())
    }

    pub fn selected(&self, i18n: &I18n) -> Result<Option<PathBuf>, StoreError> {
        let entry = self.selection.get()?;

        match &entry {
            Some(entry) => println!(
                "{}",
                i18n.t_format("current_selection", &[&entry.path.display().to_string()])
            ),
            None => println!("{}", i18n.t("no_selection").yellow()),
        }
        Ok(entry.map(|e| e.path))
    }

    pub fn selected_path(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(self.selection.get()?.map(|e| e.path))
    }

    pub fn exists(&self, i18n: &I18n) {
        println!("{}", i18n.t("exists_coming_soon").yellow());
    }
}

/// Splits the insert target into `(language, key)`.
///
/// An explicit language is used as given and the key is kept verbatim.
/// Without one, the key must look like `lang.key` and is split at the first dot.
pub fn resolve_target(key: &str, language: Option<&str>) -> Result<(String, String), StoreError> {
    if let Some(language) = language.filter(|l| !l.is_empty()) {
        return Ok((language.to_string(), key.to_string()));
    }

    match key.split_once('.') {
        Some((language, rest)) if !language.is_empty() && !rest.is_empty() => {
            Ok((language.to_string(), rest.to_string()))
        }
        _ => Err(StoreError::Config("error_no_language")),
    }
}
