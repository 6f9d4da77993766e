use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::i18n::I18n;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required argument is missing. Holds a message key.
    #[error("{}", english(.0))]
    Config(&'static str),

    #[error("{}", english(.0))]
    InvalidPath(&'static str),

    #[error("File under {} does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("File under {} could not be parsed: {source}", .path.display())]
    Unparsable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File under {} already exists.", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Language {language} does not exist in {} (available: {available}).", .path.display())]
    UnknownLanguage {
        language: String,
        path: PathBuf,
        available: String,
    },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // The target keeps its previous contents when this is raised.
    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn english(key: &str) -> String {
    I18n::new("en").t(key)
}

impl StoreError {
    /// Missing files and files that are not a translation document are both
    /// reported as "not found" to the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Unparsable { .. })
    }

    pub fn localized(&self, i18n: &I18n) -> String {
        match self {
            StoreError::Config(key) | StoreError::InvalidPath(key) => i18n.t(key),
            StoreError::NotFound(path) => {
                i18n.t_format("error_not_found", &[&path.display().to_string()])
            }
            StoreError::Unparsable { path, source } => i18n.t_format(
                "error_unparsable",
                &[&path.display().to_string(), &source.to_string()],
            ),
            StoreError::AlreadyExists(path) => {
                i18n.t_format("error_already_exists", &[&path.display().to_string()])
            }
            StoreError::UnknownLanguage { language, path, available } => i18n.t_format(
                "error_unknown_language",
                &[language, &path.display().to_string(), available],
            ),
            StoreError::Io { path, .. } => {
                i18n.t_format("error_read_file", &[&path.display().to_string()])
            }
            StoreError::Write { path, .. } => {
                i18n.t_format("error_write_file", &[&path.display().to_string()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_counts_as_not_found() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::Unparsable { path: PathBuf::from("a.json"), source };
        assert!(err.is_not_found());
        assert!(StoreError::NotFound(PathBuf::from("a.json")).is_not_found());
        assert!(!StoreError::AlreadyExists(PathBuf::from("a.json")).is_not_found());
    }

    #[test]
    fn localized_messages_fill_placeholders() {
        let i18n = I18n::new("en");
        let err = StoreError::UnknownLanguage {
            language: "de".to_string(),
            path: PathBuf::from("/tmp/t.json"),
            available: "en, fr".to_string(),
        };
        assert_eq!(
            err.localized(&i18n),
            "Language de does not exist in /tmp/t.json (available: en, fr)."
        );
        assert_eq!(err.to_string(), err.localized(&i18n));

        let err = StoreError::Config("error_no_key");
        assert_eq!(err.localized(&i18n), "Key has to be defined.");
        assert_eq!(err.to_string(), "Key has to be defined.");
    }
}
