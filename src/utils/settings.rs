//! User-level settings.
//!
//! Reads `$HOME/.commit-policy/settings.json` and uses its `env` table as a
//! fallback for environment variables, so machine-wide defaults (such as
//! `COMMIT_POLICY_CONFIG`) can live outside every repository.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings loaded from `$HOME/.commit-policy/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".commit-policy").join("settings.json"))
    }

    /// Returns an environment variable with fallback to these settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }
}

/// Returns an environment variable, falling back to the user settings file.
pub fn get_env_var(key: &str) -> Option<String> {
    if let Ok(value) = env::var(key) {
        return Some(value);
    }

    match Settings::load() {
        Ok(settings) => settings.env.get(key).cloned(),
        Err(err) => {
            tracing::debug!("could not load user settings: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn settings_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");

        let settings_json = r#"{
            "env": {
                "COMMIT_POLICY_CONFIG": "/etc/policies/web.yaml"
            }
        }"#;
        fs::write(&settings_path, settings_json).unwrap();

        let settings = Settings::load_from_path(&settings_path).unwrap();
        assert_eq!(
            settings.env.get("COMMIT_POLICY_CONFIG").unwrap(),
            "/etc/policies/web.yaml"
        );
    }

    #[test]
    fn settings_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("nope.json")).unwrap();
        assert!(settings.env.is_empty());
    }

    #[test]
    fn settings_env_var_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        fs::write(
            &settings_path,
            r#"{"env": {"COMMIT_POLICY_TEST_VAR": "from_settings"}}"#,
        )
        .unwrap();

        let settings = Settings::load_from_path(&settings_path).unwrap();

        // The real environment wins over the settings file
        env::set_var("COMMIT_POLICY_TEST_VAR", "from_env");
        assert_eq!(
            settings.get_env_var("COMMIT_POLICY_TEST_VAR").unwrap(),
            "from_env"
        );

        env::remove_var("COMMIT_POLICY_TEST_VAR");
        assert_eq!(
            settings.get_env_var("COMMIT_POLICY_TEST_VAR").unwrap(),
            "from_settings"
        );
    }

    #[test]
    fn settings_malformed_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        fs::write(&settings_path, "{not json").unwrap();
        assert!(Settings::load_from_path(&settings_path).is_err());
    }
}
