use crate::error::{BikeshareError, Result};
use crate::pager::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    pub data_dir: PathBuf,
    /// Raw rows shown per "yes" in the pager
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BikeshareError::Config(
                "page_size must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Replaces the data directory when one was given on the command line
    /// (or through `BIKESHARE_DATA_DIR`).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bikeshare").join("config.json"))
}

/// Reads a config file. A missing file yields the defaults; an unreadable
/// or malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Loads the config from `explicit` or the platform config path, then
/// applies the data directory override.
pub fn load_app_config(explicit: Option<&Path>, data_dir: Option<PathBuf>) -> Result<AppConfig> {
    let config = match explicit.map(Path::to_path_buf).or_else(get_config_path) {
        Some(path) => load_config_from(&path)?,
        None => AppConfig::default(),
    };
    Ok(config.with_data_dir(data_dir))
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let config = load_config_from(&temp_dir.path().join("config.json"))?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 5);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("nested").join("config.json");
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/bikeshare"),
            page_size: 10,
        };
        save_config(&config, &path)?;
        assert_eq!(load_config_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "page_size": 3 }"#)?;
        let config = load_config_from(&path)?;
        assert_eq!(config.page_size, 3);
        assert_eq!(config.data_dir, PathBuf::from("."));
        Ok(())
    }

    #[test]
    fn test_zero_page_size_rejected() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "page_size": 0 }"#)?;
        assert!(matches!(
            load_config_from(&path),
            Err(BikeshareError::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_data_dir_override() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_dir": "/from/file" }"#)?;

        let config = load_app_config(Some(&path), None)?;
        assert_eq!(config.data_dir, PathBuf::from("/from/file"));

        let config = load_app_config(Some(&path), Some(PathBuf::from("/from/cli")))?;
        assert_eq!(config.data_dir, PathBuf::from("/from/cli"));
        Ok(())
    }
}
