use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use chrono::Locale;
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::persistence::write_atomic;

const DEFAULT_DIR_NAME: &str = ".saavr";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "SAAVR_HOME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Returns the application-specific data directory, defaulting to `~/.saavr`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// User preferences that shape labels and where data lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// BCP 47 style tag such as `en-US`; used for month labels.
    pub locale: String,
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency_symbol: "$".into(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Locale for month names; unknown tags fall back to `en_US`.
    pub fn chrono_locale(&self) -> Locale {
        let normalized = self.locale.trim().replace('-', "_");
        Locale::try_from(normalized.as_str()).unwrap_or(Locale::en_US)
    }

    /// Directory holding the key/value store.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => app_data_dir().join("store"),
        }
    }
}

/// Loads and saves [`Config`] as pretty JSON under `<base>/config/config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            path: config_dir.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            locale: "fr-FR".into(),
            currency_symbol: "€".into(),
            data_dir: Some(dir.path().join("data")),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn malformed_file_is_a_serde_error() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ nope").unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }

    #[test]
    fn locale_tags_map_to_chrono_locales() {
        let mut config = Config::default();
        assert_eq!(config.chrono_locale(), Locale::en_US);
        config.locale = "de-DE".into();
        assert_eq!(config.chrono_locale(), Locale::de_DE);
        config.locale = "xx-YY".into();
        assert_eq!(config.chrono_locale(), Locale::en_US);
    }
}
