//! Settings and configuration utilities.
//!
//! Settings are read from $HOME/.resume-matcher/settings.json. Its `env`
//! map supplies fallbacks for environment variables; a variable set in the
//! real environment always wins.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a catalog file.
pub const CATALOG_VAR: &str = "RESUME_MATCHER_CATALOG";

/// Environment variable naming an email template file.
pub const TEMPLATE_VAR: &str = "RESUME_MATCHER_TEMPLATE";

/// Settings loaded from $HOME/.resume-matcher/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".resume-matcher").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Resolves a file path: explicit flag, then environment, then settings.
    pub fn resolve_path(&self, flag: Option<PathBuf>, key: &str) -> Option<PathBuf> {
        flag.or_else(|| {
            self.get_env_var(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn write_settings(dir: &TempDir) -> PathBuf {
        let settings_path = dir.path().join("settings.json");
        let settings_json = r#"{
            "env": {
                "RESUME_MATCHER_CATALOG": "/srv/catalog.yaml"
            }
        }"#;
        fs::write(&settings_path, settings_json).unwrap();
        settings_path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("none.json")).unwrap();
        assert!(settings.env.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load_from_path(&path).is_err());
    }

    #[test]
    fn environment_takes_precedence_over_settings() {
        let _lock = env_guard().lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(write_settings(&temp_dir)).unwrap();

        env::remove_var(CATALOG_VAR);
        assert_eq!(
            settings.get_env_var(CATALOG_VAR).as_deref(),
            Some("/srv/catalog.yaml")
        );

        env::set_var(CATALOG_VAR, "/tmp/override.yaml");
        assert_eq!(
            settings.get_env_var(CATALOG_VAR).as_deref(),
            Some("/tmp/override.yaml")
        );
        env::remove_var(CATALOG_VAR);
    }

    #[test]
    fn flag_takes_precedence_over_everything() {
        let _lock = env_guard().lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(write_settings(&temp_dir)).unwrap();
        env::remove_var(CATALOG_VAR);

        let flag = Some(PathBuf::from("cli.yaml"));
        assert_eq!(
            settings.resolve_path(flag, CATALOG_VAR),
            Some(PathBuf::from("cli.yaml"))
        );
        assert_eq!(
            settings.resolve_path(None, CATALOG_VAR),
            Some(PathBuf::from("/srv/catalog.yaml"))
        );
        assert_eq!(settings.resolve_path(None, TEMPLATE_VAR), None);
    }
}
