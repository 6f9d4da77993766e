use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCUMENT: &str = "./langlations.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    // File used by `create` when no --path is given
    pub default_file: PathBuf,
    // Relative paths are resolved against the langlations home directory
    pub state_file: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from(DEFAULT_DOCUMENT),
            state_file: PathBuf::from("state.json"),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from `home`, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_from(home: &Path) -> Result<Self> {
        let config_path = home.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(home)?;
            Ok(config)
        }
    }

    /// Like `load_from`, but any failure falls back to the defaults. Used where
    /// the command must work without a writable home (usage output).
    pub fn load_or_default(home: &Path) -> Self {
        Self::load_from(home).unwrap_or_default()
    }

    pub fn save_to(&self, home: &Path) -> Result<()> {
        fs::create_dir_all(home)
            .with_context(|| format!("Failed to create {}", home.display()))?;

        let content = toml::to_string_pretty(self)?;
        fs::write(home.join("config.toml"), content)?;
        Ok(())
    }

    /// `$LANGLATIONS_HOME`, falling back to `~/.langlations`.
    pub fn home_dir() -> PathBuf {
        if let Some(home) = std::env::var_os("LANGLATIONS_HOME").filter(|v| !v.is_empty()) {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".langlations")
    }

    pub fn state_path(&self, home: &Path) -> PathBuf {
        if self.store.state_file.is_absolute() {
            self.store.state_file.clone()
        } else {
            home.join(&self.store.state_file)
        }
    }

    pub fn get_effective_language(&self) -> String {
        // Environment overrides config if present
        let configured = std::env::var("LANGLATIONS_LANG")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.display.language.clone());

        if configured == "auto" {
            // Try to get system language
            std::env::var("LANG")
                .unwrap_or_else(|_| "en_US".to_string())
                .split('.')
                .next()
                .unwrap_or("en")
                .to_string()
        } else {
            configured
        }
    }
}
