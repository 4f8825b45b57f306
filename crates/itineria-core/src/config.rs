//! Application configuration.
//!
//! Settings are read from a JSON file, either passed explicitly or found at
//! `$XDG_CONFIG_HOME/itineria/config.json`. A missing file yields the
//! defaults. API keys may also come from the environment, which wins over
//! the file.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};

/// Directory prefix under the XDG base directories.
pub const APP_PREFIX: &str = "itineria";
/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// File name of the profile store inside the data directory.
pub const PROFILE_FILE_NAME: &str = "profile.json";

pub const PLACES_API_KEY_ENV: &str = "ITINERIA_PLACES_API_KEY";
pub const CHAT_API_KEY_ENV: &str = "ITINERIA_CHAT_API_KEY";

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub places: PlacesConfig,
    pub chat: ChatConfig,
    pub storage: StorageConfig,
    /// Request timeout for remote calls, in seconds
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: Option<PathBuf>,
    pub profile_path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration and applies environment overrides.
    ///
    /// With `path` set the file must exist. Without it the XDG config
    /// location is tried and silently skipped when there is no file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| ItineraryError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&text).map_err(|e| ItineraryError::Configuration {
            message: format!("Invalid configuration in '{}': {e}", path.display()),
        })
    }

    /// Replaces API keys with non-empty values returned by `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(PLACES_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.places.api_key = key;
        }
        if let Some(key) = lookup(CHAT_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.chat.api_key = key;
        }
    }

    /// Timeout applied to every remote request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Database location: the configured path or the XDG default.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => default_data_file(crate::planner::builder::DATABASE_FILE_NAME),
        }
    }

    /// Profile location: the configured path or the XDG default.
    pub fn profile_path(&self) -> Result<PathBuf> {
        match &self.storage.profile_path {
            Some(path) => Ok(path.clone()),
            None => default_data_file(PROFILE_FILE_NAME),
        }
    }
}

/// Returns `$XDG_DATA_HOME/itineria/<name>`, creating the directory.
pub fn default_data_file(name: &str) -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .place_data_file(name)
        .map_err(|e| ItineraryError::XdgDirectory(e.to_string()))
}

/// Returns the existing XDG config file, if there is one.
pub fn default_config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX).find_config_file(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.places.base_url, DEFAULT_PLACES_BASE_URL);
        assert_eq!(config.chat.base_url, DEFAULT_CHAT_BASE_URL);
        assert_eq!(config.chat.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"chat": {"api_key": "sk-test"}, "storage": {"database_path": "/tmp/trips.db"}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.chat.api_key, "sk-test");
        assert_eq!(config.chat.model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.places.base_url, DEFAULT_PLACES_BASE_URL);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/trips.db")
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.json")));
        assert!(matches!(result, Err(ItineraryError::FileSystem { .. })));
    }

    #[test]
    fn test_malformed_file_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ItineraryError::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides_non_empty_keys_only() {
        let mut config = Config::default();
        config.chat.api_key = "from-file".to_string();

        let env: HashMap<&str, &str> =
            HashMap::from([(PLACES_API_KEY_ENV, "places-key"), (CHAT_API_KEY_ENV, "")]);
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.places.api_key, "places-key");
        assert_eq!(config.chat.api_key, "from-file");
    }
}
