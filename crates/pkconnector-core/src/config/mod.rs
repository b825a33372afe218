//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::users::AvatarSize;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "PKCONNECTOR_CONFIG_DIR";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PKCONNECTOR_DATA_DIR";

/// Longest environment label the header can show
const MAX_LABEL_LEN: usize = 40;

/// pkConnector configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the session store; platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Label shown in the header, e.g. the deployment stage
    pub environment_label: String,
    pub avatar_size: AvatarSize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            environment_label: "TESTING / QA".to_string(),
            avatar_size: AvatarSize::Md,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("pkconnector")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let label = self.ui.environment_label.trim();
        if label.is_empty() {
            return Err(anyhow!("ui.environment_label must not be empty"));
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(anyhow!(
                "ui.environment_label must be at most {} characters",
                MAX_LABEL_LEN
            ));
        }
        Ok(())
    }

    /// Directory holding the session store. `PKCONNECTOR_DATA_DIR` wins over
    /// `storage.data_dir`, which wins over the platform data directory.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        Ok(dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?
            .join("pkconnector"))
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "storage.data_dir" => Ok(self
                .storage
                .data_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".to_string())),
            "ui.environment_label" => Ok(self.ui.environment_label.clone()),
            "ui.avatar_size" => Ok(self.ui.avatar_size.to_string()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `pkconnector config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut next = self.clone();
        match key {
            "storage.data_dir" => {
                let value = value.trim();
                next.storage.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "ui.environment_label" => {
                next.ui.environment_label = value.trim().to_string();
            }
            "ui.avatar_size" => {
                next.ui.avatar_size = AvatarSize::from_str(value).ok_or_else(|| {
                    anyhow!("Invalid avatar size: {}. Valid options: sm, md, lg", value)
                })?;
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `pkconnector config list` to see available keys.",
                    key
                ));
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = ["storage.data_dir", "ui.environment_label", "ui.avatar_size"];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.ui.environment_label, "TESTING / QA");
        assert_eq!(config.ui.avatar_size, AvatarSize::Md);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("ui.environment_label", "PRODUCTION").unwrap();
        config.set("ui.avatar_size", "lg").unwrap();
        config.set("storage.data_dir", "/tmp/pk").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\ndata_dir = \"/srv/pk\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/pk")));
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "ui = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("ui.avatar_size", "xl").is_err());
        assert!(config.set("ui.environment_label", "   ").is_err());
        assert!(config.set("nope", "1").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_clearing_data_dir() {
        let mut config = Config::default();
        config.set("storage.data_dir", "/tmp/pk").unwrap();
        config.set("storage.data_dir", "").unwrap();
        assert_eq!(config.get("storage.data_dir").unwrap(), "(default)");
    }

    #[test]
    fn test_list_covers_all_keys() {
        let listed = Config::default().list().unwrap();
        let keys: Vec<&str> = listed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["storage.data_dir", "ui.environment_label", "ui.avatar_size"]
        );
    }
}
