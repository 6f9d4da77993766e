mod config;
mod error;
mod i18n;
mod paths;
mod selection;
mod storage;
mod store_manager;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use config::Config;
use error::StoreError;
use i18n::I18n;
use paths::is_valid_path;
use selection::FileSelectionStore;
use store_manager::{resolve_target, StoreManager};

const COMMANDS: &[&str] = &["create", "insert", "select", "selected", "exists"];

#[derive(Parser)]
#[command(name = "langlations", version)]
#[command(about = "Manage JSON translation-string files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a translation file with the given languages and select it
    Create {
        /// File to create [default: ./langlations.json]
        #[arg(long, short = 'p')]
        path: Option<String>,
        /// Languages to declare (same as the positional list)
        #[arg(long = "languages", num_args = 1..)]
        languages_flag: Vec<String>,
        /// Languages to declare
        languages: Vec<String>,
    },
    /// Insert a key/value pair for a language
    Insert {
        /// Translation file [default: the selected file]
        #[arg(long, short = 'p')]
        path: Option<String>,
        /// Translation key, or `lang.key` when --language is omitted
        #[arg(long, short = 'k')]
        key: Option<String>,
        /// Language the value belongs to
        #[arg(long, short = 'l')]
        language: Option<String>,
        /// Value(s) to store; with several values the last one wins
        #[arg(long, short = 'v', num_args = 1.., allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Select the translation file used when --path is omitted
    Select {
        /// Translation file to select
        path: Option<String>,
        #[arg(long = "path", short = 'p')]
        path_flag: Option<String>,
    },
    /// Show the selected translation file
    Selected,
    /// Check whether a key exists (not implemented yet)
    Exists,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let home = Config::home_dir();

    // Missing, unknown or help commands print usage instead of a clap error,
    // even when the config directory is unusable
    if needs_usage(&args) {
        let config = Config::load_or_default(&home);
        print_help(&I18n::new(&config.get_effective_language()), &home);
        return Ok(());
    }

    let config = Config::load_from(&home).context("Failed to load config")?;
    let i18n = I18n::new(&config.get_effective_language());

    let cli = Cli::parse();
    let store = StoreManager::new(
        Box::new(FileSelectionStore::new(config.state_path(&home))),
        config.store.default_file.clone(),
    );

    run(cli.command, &store, &i18n).map_err(|err| report(err, &i18n))
}

fn run(command: Commands, store: &StoreManager, i18n: &I18n) -> Result<(), StoreError> {
    match command {
        Commands::Create { path, languages_flag, languages } => {
            let mut all = languages;
            all.extend(languages_flag);
            store.create(path.as_deref(), &all, i18n)?;
        }
        Commands::Insert { path, key, language, values } => {
            let path = resolve_insert_path(store, path.as_deref())?;

            let key = key
                .filter(|k| !k.is_empty())
                .ok_or(StoreError::Config("error_no_key"))?;
            if values.is_empty() {
                return Err(StoreError::Config("error_no_values"));
            }

            let (language, key) = resolve_target(&key, language.as_deref())?;

            if values.len() > 1 {
                store.bulk_insert(&path, &key, &language, &values, i18n)?;
            } else {
                store.insert(&path, &key, &language, &values[0], i18n)?;
            }
        }
        Commands::Select { path, path_flag } => {
            let path = path_flag
                .or(path)
                .ok_or(StoreError::Config("error_no_path"))?;
            if !is_valid_path(&path) {
                return Err(StoreError::InvalidPath("error_path_invalid"));
            }
            store.select(Path::new(&path), true, i18n)?;
        }
        Commands::Selected => {
            store.selected(i18n)?;
        }
        Commands::Exists => store.exists(i18n),
    }

    Ok(())
}

/// An explicit --path wins; otherwise the selected document is used.
fn resolve_insert_path(store: &StoreManager, path: Option<&str>) -> Result<PathBuf, StoreError> {
    match path {
        Some(p) if is_valid_path(p) => Ok(PathBuf::from(p)),
        Some(_) => Err(StoreError::InvalidPath("error_path_invalid")),
        None => {
            let selected = store
                .selected_path()?
                .ok_or(StoreError::Config("error_no_selection"))?;
            if is_valid_path(&selected.to_string_lossy()) {
                Ok(selected)
            } else {
                Err(StoreError::InvalidPath("error_selected_path_invalid"))
            }
        }
    }
}

fn report(err: StoreError, i18n: &I18n) -> anyhow::Error {
    let mut message = err.localized(i18n);
    if err.is_not_found() {
        message.push('\n');
        message.push_str(&i18n.t("hint_not_found"));
    }
    match err {
        StoreError::Io { source, .. } | StoreError::Write { source, .. } => {
            anyhow::Error::new(source).context(message)
        }
        _ => anyhow!(message),
    }
}

fn needs_usage(args: &[String]) -> bool {
    match args.get(1).map(String::as_str) {
        None | Some("help") | Some("-h") | Some("--help") => true,
        Some("-V") | Some("--version") => false,
        Some(command) => !COMMANDS.contains(&command),
    }
}

fn print_help(i18n: &I18n, home: &Path) {
    println!("{}", i18n.t("help_about"));
    println!();
    println!("{} langlations <COMMAND>", i18n.t("help_label_usage"));
    println!();
    println!("{}", i18n.t("help_label_commands"));
    println!("  {}    {}", "create".green(), i18n.t("help_create"));
    println!("            [--path|-p <PATH>] <LANGUAGES>...");
    println!("  {}    {}", "insert".green(), i18n.t("help_insert"));
    println!("            [--path|-p <PATH>] --key|-k <KEY> [--language|-l <LANG>] --values|-v <VALUE>...");
    println!("  {}    {}", "select".green(), i18n.t("help_select"));
    println!("            <PATH>");
    println!("  {}  {}", "selected".green(), i18n.t("help_selected"));
    println!("  {}    {}", "exists".green(), i18n.t("help_exists"));
    println!();
    println!("{}", i18n.t("help_language_policy").dimmed());
    println!();
    println!("{}", i18n.t("help_label_options"));
    println!("  -h, --help     Print help");
    println!("  -V, --version  Print version");
    println!();
    println!(
        "{}",
        i18n.t_format("help_config_section", &[&home.join("config.toml").display().to_string()])
    );
    println!("  - {}", i18n.t("help_config_language"));
    println!("  - {}", i18n.t("help_config_default_file"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use crate::selection::MemorySelectionStore;
    use std::fs;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn memory_store(dir: &Path) -> StoreManager {
        StoreManager::new(
            Box::new(MemorySelectionStore::default()),
            dir.join("langlations.json"),
        )
    }

    fn parse(list: &[&str]) -> Commands {
        Cli::try_parse_from(list).expect("arguments should parse").command
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn usage_for_missing_unknown_and_help() {
        assert!(needs_usage(&argv(&["langlations"])));
        assert!(needs_usage(&argv(&["langlations", "help"])));
        assert!(needs_usage(&argv(&["langlations", "--help"])));
        assert!(needs_usage(&argv(&["langlations", "remove", "x"])));
        assert!(!needs_usage(&argv(&["langlations", "--version"])));
        for command in COMMANDS {
            assert!(!needs_usage(&argv(&["langlations", command])));
        }
    }

    #[test]
    fn parses_create_languages_from_both_forms() {
        match parse(&["langlations", "create", "-p", "t.json", "en", "fr", "--languages", "de"]) {
            Commands::Create { path, languages_flag, languages } => {
                assert_eq!(path.as_deref(), Some("t.json"));
                assert_eq!(languages, vec!["en", "fr"]);
                assert_eq!(languages_flag, vec!["de"]);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn parses_insert_flags() {
        match parse(&["langlations", "insert", "-k", "en.title", "-v", "a", "b"]) {
            Commands::Insert { path, key, language, values } => {
                assert_eq!(path, None);
                assert_eq!(key.as_deref(), Some("en.title"));
                assert_eq!(language, None);
                assert_eq!(values, vec!["a", "b"]);
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn values_may_start_with_a_hyphen() {
        match parse(&["langlations", "insert", "-k", "en.delta", "-v", "-1"]) {
            Commands::Insert { values, .. } => assert_eq!(values, vec!["-1"]),
            _ => panic!("expected insert"),
        }
        match parse(&["langlations", "insert", "-k", "en.range", "-v", "-5", "5"]) {
            Commands::Insert { values, .. } => assert_eq!(values, vec!["-5", "5"]),
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn create_through_dispatch() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = memory_store(dir.path());
        let i18n = I18n::new("en");
        let path = dir.path().join("t.json");
        let path_str = path.to_string_lossy().to_string();

        run(parse(&["langlations", "create", "-p", &path_str, "en", "--languages", "fr"]), &store, &i18n)?;

        let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(doc, serde_json::json!({"en": {}, "fr": {}}));
        Ok(())
    }

    #[test]
    fn insert_uses_selected_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = memory_store(dir.path());
        let i18n = I18n::new("en");
        let path = dir.path().join("t.json");
        fs::write(&path, r#"{"en":{},"fr":{}}"#)?;
        let path_str = path.to_string_lossy().to_string();

        run(parse(&["langlations", "select", &path_str]), &store, &i18n)?;
        run(parse(&["langlations", "insert", "-k", "fr.greeting", "-v", "salut"]), &store, &i18n)?;
        run(parse(&["langlations", "insert", "-k", "greeting", "-l", "en", "-v", "hey", "hi"]), &store, &i18n)?;

        let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(
            doc,
            serde_json::json!({"en": {"greeting": "hi"}, "fr": {"greeting": "salut"}})
        );
        Ok(())
    }

    #[test]
    fn insert_argument_errors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = memory_store(dir.path());
        let i18n = I18n::new("en");
        let path = dir.path().join("t.json");
        fs::write(&path, r#"{"en":{}}"#)?;
        let path_str = path.to_string_lossy().to_string();

        let err = run(parse(&["langlations", "insert", "-k", "en.a", "-v", "x"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::Config("error_no_selection")));

        let err = run(parse(&["langlations", "insert", "-p", "a?.json", "-k", "en.a", "-v", "x"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath("error_path_invalid")));

        let err = run(parse(&["langlations", "insert", "-p", &path_str, "-v", "x"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::Config("error_no_key")));

        let err = run(parse(&["langlations", "insert", "-p", &path_str, "-k", "en.a"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::Config("error_no_values")));

        let err = run(parse(&["langlations", "insert", "-p", &path_str, "-k", "a", "-v", "x"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::Config("error_no_language")));

        assert_eq!(fs::read_to_string(&path)?, r#"{"en":{}}"#);
        Ok(())
    }

    #[test]
    fn select_needs_an_existing_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = memory_store(dir.path());
        let i18n = I18n::new("en");

        let err = run(parse(&["langlations", "select"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::Config("error_no_path")));

        let err = run(parse(&["langlations", "select", "/nonexistent/t.json"]), &store, &i18n).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.selected_path()?, None);
        Ok(())
    }

    #[test]
    fn selected_and_exists_never_fail() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = memory_store(dir.path());
        let i18n = I18n::new("en");

        run(Commands::Selected, &store, &i18n)?;
        run(Commands::Exists, &store, &i18n)?;
        Ok(())
    }

    #[test]
    fn report_hints_for_missing_files() {
        let i18n = I18n::new("en");
        let report = report(StoreError::NotFound(PathBuf::from("/t.json")), &i18n);
        assert_eq!(
            report.to_string(),
            format!("File under /t.json does not exist.\n{}", i18n.t("hint_not_found"))
        );
    }

    #[test]
    fn report_keeps_io_source() {
        let i18n = I18n::new("en");
        let err = StoreError::Write {
            path: PathBuf::from("/ro/t.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let report = report(err, &i18n);
        assert_eq!(report.to_string(), "Failed to write /ro/t.json");
        assert_eq!(report.root_cause().to_string(), "denied");
    }
}
